//! Backend configuration parsed from environment variables.

use crate::api::RouteStyle;

pub const DEFAULT_BASE_URL: &str = "https://inventory-management-cb.vercel.app/api/v1";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment value was present but could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub route_style: RouteStyle,
    /// `None` means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: u64,
    pub page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            route_style: RouteStyle::Rest,
            request_timeout_secs: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    /// Build typed backend config from environment variables.
    ///
    /// Optional:
    /// - `STOCKROOM_API_BASE_URL`: default [`DEFAULT_BASE_URL`]
    /// - `STOCKROOM_ROUTE_STYLE`: `rest` (default) or `action`
    /// - `STOCKROOM_REQUEST_TIMEOUT_SECS`: unset means no timeout
    /// - `STOCKROOM_CONNECT_TIMEOUT_SECS`: default 10
    /// - `STOCKROOM_PAGE_SIZE`: default 5
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when a value is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("STOCKROOM_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let route_style = parse_route_style(std::env::var("STOCKROOM_ROUTE_STYLE").ok().as_deref())?;
        let request_timeout_secs = env_parse_opt_u64("STOCKROOM_REQUEST_TIMEOUT_SECS")?;
        let connect_timeout_secs =
            env_parse_opt_u64("STOCKROOM_CONNECT_TIMEOUT_SECS")?.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
        let page_size = match env_parse_opt_u64("STOCKROOM_PAGE_SIZE")? {
            Some(0) => return Err(ConfigError::Parse("STOCKROOM_PAGE_SIZE must be at least 1".into())),
            Some(n) => usize::try_from(n).map_err(|_| ConfigError::Parse(format!("STOCKROOM_PAGE_SIZE too large: {n}")))?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            route_style,
            request_timeout_secs,
            connect_timeout_secs,
            page_size,
        })
    }

    /// Replace the base URL, normalising the trailing slash.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn env_parse_opt_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("{key} is not a number: {raw}"))),
        Err(_) => Ok(None),
    }
}

/// Parse a route style name; absent means [`RouteStyle::Rest`].
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for unknown names.
pub fn parse_route_style(raw: Option<&str>) -> Result<RouteStyle, ConfigError> {
    match raw.map(str::trim).unwrap_or("rest") {
        "" | "rest" => Ok(RouteStyle::Rest),
        "action" => Ok(RouteStyle::Action),
        other => Err(ConfigError::Parse(format!(
            "unknown STOCKROOM_ROUTE_STYLE '{other}' (expected 'rest' or 'action')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
