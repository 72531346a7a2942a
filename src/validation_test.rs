use super::*;

#[test]
fn require_flags_blank_values() {
    let mut errors = ValidationErrors::new();
    errors.require("", "Name is required");
    errors.require("   ", "Image is required");
    errors.require("ok", "never");
    assert_eq!(errors.messages(), ["Name is required", "Image is required"]);
}

#[test]
fn max_len_counts_chars_not_bytes() {
    let mut errors = ValidationErrors::new();
    errors.max_len("ééééé", 5, "Name");
    assert!(errors.is_empty());
    errors.max_len("ééééééé", 5, "Name");
    assert_eq!(errors.messages(), ["Name must be at most 5 characters"]);
}

#[test]
fn one_of_checks_membership() {
    let mut errors = ValidationErrors::new();
    errors.one_of("Kg", &["Kg", "Litre"], "bad unit");
    errors.one_of("Ton", &["Kg", "Litre"], "bad unit");
    assert_eq!(errors.len(), 1);
}

#[test]
fn into_result_and_display() {
    assert!(ValidationErrors::new().into_result().is_ok());

    let mut errors = ValidationErrors::new();
    errors.push("Customer is required");
    errors.push("Bill number is required");
    let err = errors.into_result().unwrap_err();
    assert_eq!(err.to_string(), "Customer is required\nBill number is required");
}

#[test]
fn parse_helpers() {
    assert_eq!(parse_decimal(" 12.50 "), Some(Decimal::new(1250, 2)));
    assert_eq!(parse_decimal("abc"), None);
    assert_eq!(parse_int("7"), Some(7));
    assert_eq!(parse_int("7.5"), None);
    assert_eq!(parse_id("42"), Some(42));
    assert_eq!(parse_id("0"), None);
    assert_eq!(parse_id("-3"), None);
    assert_eq!(optional("  "), None);
    assert_eq!(optional(" x "), Some("x".to_string()));
}

#[test]
fn email_shape() {
    assert!(looks_like_email("admin@example.com"));
    assert!(!looks_like_email("admin.example.com"));
    assert!(!looks_like_email("@example.com"));
    assert!(!looks_like_email("a@b@c.com"));
    assert!(!looks_like_email("a@localhost"));
    assert!(!looks_like_email("a b@example.com"));
}

#[test]
fn iso_dates() {
    assert!(is_iso_date("2024-02-29"));
    assert!(!is_iso_date("2023-02-29"));
    assert!(!is_iso_date("29/02/2024"));

    let mut errors = ValidationErrors::new();
    errors.date("", "bad date");
    errors.date("2024-13-01", "bad date");
    assert_eq!(errors.messages(), ["bad date"]);
}

#[test]
fn today_is_iso() {
    assert!(is_iso_date(&today()));
}
