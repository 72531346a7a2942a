use super::*;
use stockroom::entity::category::Category;
use stockroom::entity::sale::SaleDraft;
use stockroom::listing::paginate;
use stockroom::validation::ValidationErrors;

fn category(id: i64, name: &str, description: Option<&str>) -> Category {
    Category {
        category_id: id,
        category_name: name.into(),
        category_image: format!("https://img.example/{id}.png"),
        description: description.map(Into::into),
    }
}

#[test]
fn table_pads_to_widest_cell() {
    let out = table(&["ID", "Name"], &[vec!["1".into(), "Fasteners".into()], vec!["12".into(), "Tape".into()]]);
    assert_eq!(out, "ID  Name\n--  ---------\n1   Fasteners\n12  Tape\n");
}

#[test]
fn empty_table_says_so() {
    assert_eq!(table(&["ID"], &[]), "No records found.\n");
}

#[test]
fn page_renders_rows_and_pager() {
    let items = [category(1, "Fasteners", None), category(2, "Adhesives", Some("Glue"))];
    let refs: Vec<&Category> = items.iter().collect();
    let view = paginate(&refs, 1, 1);
    let out = page(&view, &Lookups::default());
    assert!(out.contains("Fasteners"));
    assert!(!out.contains("Adhesives"));
    assert!(out.ends_with("Page 1 of 2 · 2 records · [next]\n"));
}

#[test]
fn empty_page_still_shows_one_page() {
    let view: PageView<&Category> = paginate(&[], 1, 5);
    let out = page(&view, &Lookups::default());
    assert_eq!(out, "No records found.\nPage 1 of 1 · 0 records\n");
}

#[test]
fn sale_draft_lists_line_items() {
    let mut sale = SaleDraft::dated("2026-01-05");
    sale.items.set(0, "product_id", "3").unwrap();
    sale.items.set(0, "quantity", "2").unwrap();
    sale.items.set(0, "rate", "2.50").unwrap();
    let out = draft(&sale);
    assert!(out.contains("sale_date"));
    assert!(out.contains("2026-01-05"));
    assert!(out.contains("5.00"));
    assert!(out.contains("Amount"));
}

#[test]
fn validation_notice_is_bulleted() {
    let mut errors = ValidationErrors::default();
    errors.push("Category Name is required");
    errors.push("Image URL is required");
    let out = notice(&Notice::validation(&errors));
    assert_eq!(out, "Validation Error\n  - Category Name is required\n  - Image URL is required");
}

#[test]
fn success_and_error_notices() {
    assert_eq!(notice(&Notice::success("Vendor added successfully.")), "✔ Vendor added successfully.");
    assert_eq!(notice(&Notice::error("Could not delete vendor.")), "✖ Could not delete vendor.");
}

#[test]
fn pages_lists_every_route() {
    let out = pages();
    for page in Page::ALL {
        assert!(out.contains(page.path()), "{} missing", page.path());
    }
}
