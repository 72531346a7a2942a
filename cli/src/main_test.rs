use super::*;
use stockroom::api::RouteStyle;
use stockroom::entity::sale::SaleDraft;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("stockroom").chain(args.iter().copied())).unwrap()
}

#[test]
fn assignment_splits_on_first_equals() {
    assert_eq!(parse_assignment("bill_no=B-7").unwrap(), ("bill_no", "B-7"));
    assert_eq!(parse_assignment(" payment_details = ref=42").unwrap(), ("payment_details", " ref=42"));
    assert_eq!(parse_assignment("description=").unwrap(), ("description", ""));
}

#[test]
fn assignment_needs_field_and_equals() {
    assert!(matches!(parse_assignment("bill_no"), Err(CliError::InvalidAssignment(_))));
    assert!(matches!(parse_assignment("=x"), Err(CliError::InvalidAssignment(_))));
}

#[test]
fn flags_override_config() {
    let config = resolve_config(&cli(&[
        "--base-url",
        "http://127.0.0.1:9000/api/v1/",
        "--route-style",
        "action",
        "--page-size",
        "20",
        "--timeout",
        "30",
        "pages",
    ]))
    .unwrap();
    assert_eq!(config.base_url, "http://127.0.0.1:9000/api/v1");
    assert_eq!(config.route_style, RouteStyle::Action);
    assert_eq!(config.page_size, 20);
    assert_eq!(config.request_timeout_secs, Some(30));
}

#[test]
fn zero_page_size_is_rejected() {
    let err = resolve_config(&cli(&["--page-size", "0", "pages"])).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}

#[test]
fn unknown_route_style_is_rejected() {
    let err = resolve_config(&cli(&["--route-style", "graphql", "pages"])).unwrap_err();
    assert!(err.to_string().contains("graphql"));
}

#[test]
fn entity_subcommands_parse() {
    let parsed = cli(&["sales", "create", "--set", "customer_id=4", "--item", "product_id=1,quantity=2,rate=3"]);
    let Command::Sales(EntityCommand { action: EntityAction::Create(mutation) }) = parsed.command else {
        panic!("expected sales create");
    };
    assert_eq!(mutation.fields, vec!["customer_id=4"]);
    assert_eq!(mutation.items.len(), 1);

    let parsed = cli(&["categories", "list", "--sort", "name", "--sort", "name", "--page", "2"]);
    assert!(matches!(
        parsed.command,
        Command::Categories(EntityCommand { action: EntityAction::List { page: 2, ref sort, .. } }) if sort.len() == 2
    ));

    let parsed = cli(&["vendors", "delete", "3", "--yes"]);
    assert!(matches!(
        parsed.command,
        Command::Vendors(EntityCommand { action: EntityAction::Delete { id: 3, yes: true } })
    ));
}

fn offline_manager<E: Entity>() -> ListManager<E, ApiClient> {
    manager::<E>(ApiConfig::default().with_base_url("http://127.0.0.1:9")).unwrap()
}

#[test]
fn items_replace_the_draft_rows() {
    let mut manager = offline_manager::<Sale>();
    manager.open_create().unwrap();
    let mutation = MutationArgs {
        fields: vec!["customer_id=4".into()],
        items: vec!["product_id=1,quantity=2,rate=3".into(), "product_id=2,quantity=1,rate=0.5".into()],
    };
    apply_mutation(&mut manager, &mutation).unwrap();

    let draft: &SaleDraft = manager.draft().unwrap();
    assert_eq!(draft.customer_id, "4");
    assert_eq!(draft.items.len(), 2);
    assert_eq!(draft.items.rows()[1].product_id, "2");
    assert_eq!(format!("{:.2}", draft.total_sale_price()), "6.50");
}

#[test]
fn items_on_a_plain_form_are_rejected() {
    let mut manager = offline_manager::<Vendor>();
    manager.open_create().unwrap();
    let mutation = MutationArgs { fields: vec![], items: vec!["product_id=1".into()] };
    assert!(matches!(apply_mutation(&mut manager, &mutation), Err(CliError::Workflow(_))));
}

#[test]
fn unknown_field_surfaces_as_workflow_error() {
    let mut manager = offline_manager::<Category>();
    manager.open_create().unwrap();
    let mutation = MutationArgs { fields: vec!["colour=red".into()], items: vec![] };
    let err = apply_mutation(&mut manager, &mutation).unwrap_err();
    assert_eq!(err.to_string(), "unknown field `colour`");
}

#[test]
fn sales_column_sort_is_unsupported() {
    assert!(Sale::parse_sort_key("bill_no").is_none());
    assert!(Category::parse_sort_key("name").is_some());
}
