use super::*;

fn parse(line: &str) -> ShellCommand {
    ShellCommand::parse(line).unwrap().unwrap()
}

#[test]
fn blank_lines_are_skipped() {
    assert_eq!(ShellCommand::parse("   "), Ok(None));
}

#[test]
fn navigation_commands() {
    assert_eq!(parse("list"), ShellCommand::List);
    assert_eq!(parse("page 3"), ShellCommand::Page(3));
    assert_eq!(parse(" next "), ShellCommand::Next);
    assert_eq!(parse("prev"), ShellCommand::Previous);
    assert_eq!(parse("sort name"), ShellCommand::Sort("name".into()));
}

#[test]
fn search_keeps_inner_spaces_and_may_be_empty() {
    assert_eq!(parse("search hex  bolt"), ShellCommand::Search("hex  bolt".into()));
    assert_eq!(parse("search"), ShellCommand::Search(String::new()));
}

#[test]
fn set_takes_rest_of_line_as_value() {
    assert_eq!(
        parse("set description Nuts, bolts and washers"),
        ShellCommand::Set { field: "description".into(), value: "Nuts, bolts and washers".into() }
    );
    assert_eq!(parse("set bill_no"), ShellCommand::Set { field: "bill_no".into(), value: String::new() });
}

#[test]
fn item_numbers_are_one_based() {
    assert_eq!(parse("item add"), ShellCommand::ItemAdd);
    assert_eq!(parse("item rm 2"), ShellCommand::ItemRemove(1));
    assert_eq!(
        parse("item set 1 quantity 4"),
        ShellCommand::ItemSet { index: 0, field: "quantity".into(), value: "4".into() }
    );
    assert!(matches!(ShellCommand::parse("item rm 0"), Err(ParseError::Usage(_))));
    assert!(matches!(ShellCommand::parse("item set 1"), Err(ParseError::Usage(_))));
    assert!(matches!(ShellCommand::parse("item swap"), Err(ParseError::Usage(_))));
}

#[test]
fn form_and_delete_commands() {
    assert_eq!(parse("new"), ShellCommand::New);
    assert_eq!(parse("edit 7"), ShellCommand::Edit(7));
    assert_eq!(parse("save"), ShellCommand::Save);
    assert_eq!(parse("cancel"), ShellCommand::Cancel);
    assert_eq!(parse("delete 9"), ShellCommand::Delete(9));
    assert_eq!(parse("y"), ShellCommand::Confirm);
    assert_eq!(parse("abort"), ShellCommand::Abort);
    assert_eq!(parse("quit"), ShellCommand::Quit);
}

#[test]
fn malformed_numbers_report_usage() {
    assert_eq!(ShellCommand::parse("edit seven"), Err(ParseError::Usage("edit ID")));
    assert_eq!(ShellCommand::parse("page"), Err(ParseError::Usage("page N")));
    assert_eq!(ShellCommand::parse("sort"), Err(ParseError::Usage("sort COLUMN")));
}

#[test]
fn unknown_command() {
    let err = ShellCommand::parse("frobnicate now").unwrap_err();
    assert_eq!(err.to_string(), "unknown command `frobnicate`; type `help`");
}
