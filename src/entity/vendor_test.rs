use super::*;
use serde_json::json;

#[test]
fn decodes_numeric_contact_number() {
    let vendor: Vendor = serde_json::from_value(json!({
        "vendor_id": 8,
        "vendor_name": "Acme Supplies",
        "contact_number": 9_812_345_678_i64
    }))
    .unwrap();
    assert_eq!(vendor.contact_number.as_deref(), Some("9812345678"));
    assert_eq!(vendor.email_id, None);
}

#[test]
fn cells_render_missing_fields_as_dash() {
    let vendor: Vendor = serde_json::from_value(json!({ "vendor_id": 8, "vendor_name": "Acme" })).unwrap();
    let cells = vendor.cells(&Lookups::default());
    assert_eq!(cells.len(), Vendor::COLUMNS.len());
    assert_eq!(cells[..2], ["8".to_string(), "Acme".to_string()]);
    assert!(cells[2..].iter().all(|c| c == "-"));
}

#[test]
fn only_name_is_required() {
    assert_eq!(VendorDraft::default().validate().messages(), ["Vendor name is required"]);

    let draft = VendorDraft { vendor_name: "Acme".to_string(), ..VendorDraft::default() };
    assert!(draft.validate().is_empty());
}

#[test]
fn email_shape_checked_when_present() {
    let mut draft = VendorDraft { vendor_name: "Acme".to_string(), ..VendorDraft::default() };
    draft.set_field("email_id", "sales-at-acme").unwrap();
    assert_eq!(draft.validate().messages(), ["Email must be a valid address"]);
}

#[test]
fn edit_prefills_every_field() {
    let vendor = Vendor {
        vendor_id: 3,
        vendor_name: "Globex".to_string(),
        gst_number: Some("27AAACG1234F1Z5".to_string()),
        license_number: None,
        address: Some("1 Main St".to_string()),
        primary_contact: Some("Hank".to_string()),
        contact_number: Some("555-0100".to_string()),
        email_id: Some("hank@globex.example".to_string()),
    };
    let draft = vendor.to_draft();
    for field in VendorDraft::FIELDS {
        assert!(draft.field(field).is_some(), "{field}");
    }
    assert_eq!(draft.field("license_number").as_deref(), Some(""));
    assert_eq!(draft.field("address").as_deref(), Some("1 Main St"));
}
