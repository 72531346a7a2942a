use super::*;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers hold [`env_guard`] so env mutation never races another test.
unsafe fn clear_stockroom_env() {
    unsafe {
        std::env::remove_var("STOCKROOM_API_BASE_URL");
        std::env::remove_var("STOCKROOM_ROUTE_STYLE");
        std::env::remove_var("STOCKROOM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("STOCKROOM_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("STOCKROOM_PAGE_SIZE");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = env_guard();
    unsafe { clear_stockroom_env() };

    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg, ApiConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.route_style, RouteStyle::Rest);
    assert_eq!(cfg.request_timeout_secs, None);
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    assert_eq!(cfg.page_size, 5);
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_guard();
    unsafe {
        clear_stockroom_env();
        std::env::set_var("STOCKROOM_API_BASE_URL", "http://localhost:4000/api/v1/");
        std::env::set_var("STOCKROOM_ROUTE_STYLE", "action");
        std::env::set_var("STOCKROOM_REQUEST_TIMEOUT_SECS", "30");
        std::env::set_var("STOCKROOM_CONNECT_TIMEOUT_SECS", "3");
        std::env::set_var("STOCKROOM_PAGE_SIZE", "20");
    }

    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "http://localhost:4000/api/v1");
    assert_eq!(cfg.route_style, RouteStyle::Action);
    assert_eq!(cfg.request_timeout_secs, Some(30));
    assert_eq!(cfg.connect_timeout_secs, 3);
    assert_eq!(cfg.page_size, 20);

    unsafe { clear_stockroom_env() };
}

#[test]
fn from_env_rejects_bad_timeout() {
    let _guard = env_guard();
    unsafe {
        clear_stockroom_env();
        std::env::set_var("STOCKROOM_REQUEST_TIMEOUT_SECS", "soon");
    }

    let err = ApiConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("STOCKROOM_REQUEST_TIMEOUT_SECS"));

    unsafe { clear_stockroom_env() };
}

#[test]
fn from_env_rejects_zero_page_size() {
    let _guard = env_guard();
    unsafe {
        clear_stockroom_env();
        std::env::set_var("STOCKROOM_PAGE_SIZE", "0");
    }

    assert!(ApiConfig::from_env().is_err());

    unsafe { clear_stockroom_env() };
}

#[test]
fn route_style_parsing() {
    assert_eq!(parse_route_style(None).unwrap(), RouteStyle::Rest);
    assert_eq!(parse_route_style(Some("rest")).unwrap(), RouteStyle::Rest);
    assert_eq!(parse_route_style(Some(" action ")).unwrap(), RouteStyle::Action);
    let err = parse_route_style(Some("graphql")).unwrap_err();
    assert!(err.to_string().contains("graphql"));
}

#[test]
fn with_base_url_trims_trailing_slash() {
    let cfg = ApiConfig::default().with_base_url("http://127.0.0.1:9000/");
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
}
