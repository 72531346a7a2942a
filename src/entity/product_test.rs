use super::*;
use crate::lookup::LabelIndex;
use serde_json::json;

fn categories() -> Lookups {
    let index: LabelIndex = [(2, "Hardware".to_string())].into_iter().collect();
    Lookups::default().with(LookupKind::Categories, index)
}

fn product(category_id: Option<EntityId>, category_name: Option<&str>) -> Product {
    Product {
        product_id: 10,
        product_name: "Hex Bolt".to_string(),
        category_id,
        category_name: category_name.map(str::to_string),
        sku_number: Some("HB-10".to_string()),
        product_description: None,
        product_specification: None,
        product_weight: Some(Decimal::new(25, 1)),
    }
}

#[test]
fn decodes_weight_from_number_or_string() {
    let from_number: Product =
        serde_json::from_value(json!({ "product_id": 1, "product_name": "A", "product_weight": 2.5 })).unwrap();
    let from_string: Product =
        serde_json::from_value(json!({ "product_id": 1, "product_name": "A", "product_weight": "2.5" })).unwrap();
    assert_eq!(from_number.product_weight, Some(Decimal::new(25, 1)));
    assert_eq!(from_string.product_weight, Some(Decimal::new(25, 1)));
}

#[test]
fn category_label_prefers_joined_name() {
    let lookups = categories();
    assert_eq!(product(Some(2), Some("Fasteners")).category_label(&lookups), Some("Fasteners"));
    assert_eq!(product(Some(2), None).category_label(&lookups), Some("Hardware"));
    assert_eq!(product(Some(7), None).category_label(&lookups), None);
}

#[test]
fn search_includes_category() {
    let lookups = categories();
    assert_eq!(product(Some(2), None).search_fields(&lookups), vec![Some("Hex Bolt"), Some("Hardware")]);
}

#[test]
fn cells_fall_back_to_placeholder() {
    let lookups = categories();
    let row = product(Some(7), None).cells(&lookups);
    assert_eq!(row[2], "Unknown Category");
    assert_eq!(row[4], "2.5");
    assert_eq!(row[5], "-");
    assert_eq!(product(None, None).cells(&lookups)[2], "-");
}

#[test]
fn required_fields() {
    let errors = ProductDraft::default().validate();
    assert_eq!(errors.messages(), ["Product name is required", "Category is required"]);
}

#[test]
fn weight_must_be_numeric() {
    let mut draft = product(Some(2), None).to_draft();
    draft.set_field("product_weight", "heavy").unwrap();
    assert_eq!(draft.validate().messages(), ["Product weight must be a non-negative number"]);
    draft.set_field("product_weight", "-1").unwrap();
    assert_eq!(draft.validate().len(), 1);
}

#[test]
fn payload_omits_blank_weight() {
    let mut draft = product(Some(2), None).to_draft();
    draft.set_field("product_weight", "").unwrap();
    let body = serde_json::to_value(draft.payload().unwrap()).unwrap();
    assert_eq!(body["category_id"], json!(2));
    assert_eq!(body["sku_number"], json!("HB-10"));
    assert!(body.get("product_weight").is_none());
}

#[test]
fn payload_sends_weight_as_number() {
    let draft = product(Some(2), None).to_draft();
    let body = serde_json::to_value(draft.payload().unwrap()).unwrap();
    assert_eq!(body["product_weight"], json!(2.5));
}
