use super::*;
use serde_json::json;

fn filled() -> CustomerDraft {
    CustomerDraft {
        customer_name: "Wayne Enterprises".to_string(),
        address: String::new(),
        email_id: "orders@wayne.example".to_string(),
        gst_number: String::new(),
        primary_contact: "Lucius".to_string(),
        contact_number: "555-0199".to_string(),
    }
}

#[test]
fn every_missing_mandatory_field_is_listed() {
    assert_eq!(
        CustomerDraft::default().validate().messages(),
        [
            "Customer name is required",
            "Primary contact is required",
            "Contact number is required",
            "Email is required",
        ]
    );
}

#[test]
fn filled_draft_is_valid() {
    assert!(filled().validate().is_empty());
}

#[test]
fn malformed_email_is_rejected() {
    let mut draft = filled();
    draft.set_field("email_id", "wayne").unwrap();
    assert_eq!(draft.validate().messages(), ["Email must be a valid address"]);
}

#[test]
fn payload_posts_text_fields() {
    let mut draft = filled();
    draft.set_field("customer_name", "  Wayne Enterprises ").unwrap();
    let body = serde_json::to_value(draft.payload().unwrap()).unwrap();
    assert_eq!(body["customer_name"], json!("Wayne Enterprises"));
    assert_eq!(body["gst_number"], json!(""));
}

#[test]
fn minimal_record_decodes() {
    let row: Customer =
        serde_json::from_value(json!({ "customer_id": 5, "customer_name": "Stark Industries" })).unwrap();
    assert_eq!(row.id(), 5);
    assert_eq!(row.search_fields(&Lookups::default()), vec![Some("Stark Industries")]);
    assert_eq!(row.to_draft().contact_number, "");
}
