use super::*;
use serde_json::json;

fn category(id: EntityId, name: &str, description: Option<&str>) -> Category {
    Category {
        category_id: id,
        category_name: name.to_string(),
        category_image: format!("https://img.example.com/{id}.png"),
        description: description.map(str::to_string),
    }
}

#[test]
fn decodes_without_optional_description() {
    let row: Category = serde_json::from_value(json!({
        "category_id": 3,
        "category_name": "Fasteners",
        "category_image": "https://img.example.com/3.png"
    }))
    .unwrap();
    assert_eq!(row.description, None);
    assert_eq!(row.label(), "Fasteners");
}

#[test]
fn search_covers_name_and_description() {
    let row = category(1, "Tools", Some("Hand and power tools"));
    let lookups = Lookups::default();
    assert_eq!(row.search_fields(&lookups), vec![Some("Tools"), Some("Hand and power tools")]);

    let bare = category(2, "Paint", None);
    assert_eq!(bare.search_fields(&lookups), vec![Some("Paint"), None]);
}

#[test]
fn compare_by_each_key() {
    let a = category(1, "Zinc", Some("metal"));
    let b = category(2, "Adhesives", None);
    assert_eq!(a.compare(&b, CategorySortKey::Id), Ordering::Less);
    assert_eq!(a.compare(&b, CategorySortKey::Name), Ordering::Greater);
    assert_eq!(a.compare(&b, CategorySortKey::Description), Ordering::Greater);
}

#[test]
fn sort_key_parses_column_names() {
    assert_eq!(CategorySortKey::parse("Name"), Some(CategorySortKey::Name));
    assert_eq!(CategorySortKey::parse("category_id"), Some(CategorySortKey::Id));
    assert_eq!(CategorySortKey::parse("image"), None);
}

#[test]
fn draft_round_trips_through_edit() {
    let row = category(4, "Tools", None);
    let draft = row.to_draft();
    assert_eq!(draft.category_name, "Tools");
    assert_eq!(draft.description, "");
    assert_eq!(draft.field("category_image").as_deref(), Some("https://img.example.com/4.png"));
}

#[test]
fn empty_draft_reports_required_fields() {
    let errors = CategoryDraft::default().validate();
    assert_eq!(errors.messages(), ["Category Name is required", "Image URL is required"]);
}

#[test]
fn length_limits() {
    let draft = CategoryDraft {
        category_name: "A very long category".to_string(),
        category_image: "x".repeat(256),
        description: "d".repeat(61),
    };
    assert_eq!(
        draft.validate().messages(),
        [
            "Category Name must be at most 15 characters",
            "Image URL must be at most 255 characters",
            "Description must be at most 60 characters",
        ]
    );
}

#[test]
fn set_field_rejects_unknown() {
    let mut draft = CategoryDraft::default();
    draft.set_field("category_name", "Paint").unwrap();
    assert_eq!(draft.category_name, "Paint");
    assert_eq!(
        draft.set_field("category_id", "9"),
        Err(FieldError::Unknown("category_id".to_string()))
    );
}

#[test]
fn payload_trims_text() {
    let draft = CategoryDraft {
        category_name: " Paint ".to_string(),
        category_image: "https://img.example.com/p.png".to_string(),
        description: String::new(),
    };
    let body = serde_json::to_value(draft.payload().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "category_name": "Paint",
            "category_image": "https://img.example.com/p.png",
            "description": ""
        })
    );
}
