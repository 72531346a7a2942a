use super::*;
use crate::lookup::LabelIndex;
use serde_json::json;

fn lookups() -> Lookups {
    let products: LabelIndex = [(1, "Hex Bolt".to_string())].into_iter().collect();
    let vendors: LabelIndex = [(4, "Acme Supplies".to_string())].into_iter().collect();
    Lookups::default()
        .with(LookupKind::Products, products)
        .with(LookupKind::Vendors, vendors)
}

fn purchase(vendor_id: EntityId) -> Purchase {
    serde_json::from_value(json!({
        "purchase_id": 7,
        "product_id": 1,
        "vendor_id": vendor_id,
        "quantity": 12.5,
        "unit": "Kg",
        "unit_price": "4.20",
        "purchase_date": "2024-03-01",
        "invoice_number": 88_231
    }))
    .unwrap()
}

fn filled() -> PurchaseDraft {
    let mut draft = PurchaseDraft::default();
    for (field, value) in [
        ("product_id", "1"),
        ("quantity", "10"),
        ("vendor_id", "4"),
        ("purchase_date", "2024-03-01"),
        ("unit_price", "2.50"),
        ("invoice_number", "INV-1"),
    ] {
        draft.set_field(field, value).unwrap();
    }
    draft
}

#[test]
fn decodes_mixed_number_shapes() {
    let row = purchase(4);
    assert_eq!(row.quantity, Decimal::new(125, 1));
    assert_eq!(row.unit_price, Decimal::new(420, 2));
    assert_eq!(row.invoice_number, "88231");
    assert_eq!(row.total(), Some(Decimal::new(52500, 3)));
}

#[test]
fn unknown_vendor_renders_placeholder() {
    let cells = purchase(999).cells(&lookups());
    assert_eq!(cells[1], "Hex Bolt");
    assert_eq!(cells[2], "Unknown Vendor");
    assert_eq!(cells[3], "12.5 Kg");
    assert_eq!(cells[5], "52.50");
}

#[test]
fn search_uses_resolved_labels() {
    let lookups = lookups();
    assert_eq!(
        purchase(4).search_fields(&lookups),
        vec![Some("Hex Bolt"), Some("Acme Supplies"), Some("88231")]
    );
    assert_eq!(purchase(999).search_fields(&lookups)[1], None);
}

#[test]
fn new_draft_defaults_to_kilograms() {
    assert_eq!(PurchaseDraft::default().unit, "Kg");
}

#[test]
fn empty_draft_lists_every_problem_in_order() {
    assert_eq!(
        PurchaseDraft::default().validate().messages(),
        [
            "Product is required",
            "Valid quantity is required",
            "Valid unit price is required",
            "Purchase date is required",
            "Vendor is required",
            "Invoice number is required",
        ]
    );
}

#[test]
fn zero_quantity_and_bad_unit_rejected() {
    let mut draft = filled();
    draft.set_field("quantity", "0").unwrap();
    draft.set_field("unit", "Ton").unwrap();
    draft.set_field("purchase_date", "01/03/2024").unwrap();
    assert_eq!(
        draft.validate().messages(),
        [
            "Valid quantity is required",
            "Unit must be one of Kg, Litre, Pack, Pieces",
            "Purchase date must be YYYY-MM-DD",
        ]
    );
}

#[test]
fn payload_is_typed_and_omits_upload() {
    let mut draft = filled();
    draft.set_field("invoice_upload", "scan.pdf").unwrap();
    let body = serde_json::to_value(draft.payload().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "product_id": 1,
            "quantity": 10.0,
            "unit": "Kg",
            "vendor_id": 4,
            "purchase_date": "2024-03-01",
            "unit_price": 2.5,
            "invoice_number": "INV-1"
        })
    );
}

#[test]
fn edit_prefills_from_record() {
    let draft = purchase(4).to_draft();
    assert_eq!(draft.vendor_id, "4");
    assert_eq!(draft.quantity, "12.5");
    assert!(draft.validate().is_empty());
}

#[test]
fn overflowing_total_renders_dash() {
    let row: Purchase = serde_json::from_value(json!({
        "purchase_id": 8,
        "product_id": 1,
        "vendor_id": 4,
        "quantity": 1e20,
        "unit_price": 1e20
    }))
    .unwrap();
    assert_eq!(row.total(), None);
    assert_eq!(row.cells(&lookups())[5], "-");
}
