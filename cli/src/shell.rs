//! Interactive session on one admin page.
//!
//! One line per command, read from stdin until `quit` or end of input.
//! Every command maps onto one [`ListManager`] operation; notices queued by
//! the operation are printed after it, so the session reads like the page's
//! toasts and dialogs.

use stockroom::entity::{Entity, EntityId};
use stockroom::navigation::Page;
use stockroom::{ApiClient, ListManager, WorkflowError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{CliError, render};

pub const HELP: &str = "\
list                      show the current page
search TEXT               filter rows (empty clears)
page N | next | prev      move between pages
sort COLUMN               sort; repeat to flip direction
refresh                   reload records and lookups
new | edit ID             open the form
set FIELD VALUE           fill a form field
item add                  append a sale line item
item rm N                 remove line item N
item set N FIELD VALUE    fill a line item field
show                      print the open form
save | cancel             submit or discard the form
delete ID                 ask to delete a record
confirm | abort           answer the delete question
help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    Page(usize),
    Next,
    Previous,
    Sort(String),
    Refresh,
    New,
    Edit(EntityId),
    Set { field: String, value: String },
    ItemAdd,
    ItemRemove(usize),
    ItemSet { index: usize, field: String, value: String },
    Show,
    Save,
    Cancel,
    Delete(EntityId),
    Confirm,
    Abort,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// Line item numbers are 1-based as displayed by `show`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = split_word(line);
        let command = match word {
            "list" | "ls" => Self::List,
            "search" => Self::Search(rest.to_string()),
            "page" => Self::Page(number(rest, "page N")?),
            "next" => Self::Next,
            "prev" | "previous" => Self::Previous,
            "sort" if !rest.is_empty() => Self::Sort(rest.to_string()),
            "sort" => return Err(ParseError::Usage("sort COLUMN")),
            "refresh" => Self::Refresh,
            "new" => Self::New,
            "edit" => Self::Edit(number(rest, "edit ID")?),
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(ParseError::Usage("set FIELD VALUE"));
                }
                Self::Set { field: field.to_string(), value: value.to_string() }
            }
            "item" => Self::parse_item(rest)?,
            "show" => Self::Show,
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "delete" | "rm" => Self::Delete(number(rest, "delete ID")?),
            "confirm" | "y" | "yes" => Self::Confirm,
            "abort" | "n" | "no" => Self::Abort,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }

    fn parse_item(rest: &str) -> Result<Self, ParseError> {
        const USAGE: &str = "item add | item rm N | item set N FIELD VALUE";
        let (verb, rest) = split_word(rest);
        match verb {
            "add" => Ok(Self::ItemAdd),
            "rm" | "remove" => Ok(Self::ItemRemove(item_index(rest, USAGE)?)),
            "set" => {
                let (index, rest) = split_word(rest);
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(ParseError::Usage(USAGE));
                }
                Ok(Self::ItemSet {
                    index: item_index(index, USAGE)?,
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            _ => Err(ParseError::Usage(USAGE)),
        }
    }
}

fn split_word(text: &str) -> (&str, &str) {
    match text.trim().split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text.trim(), ""),
    }
}

fn number<T: std::str::FromStr>(text: &str, usage: &'static str) -> Result<T, ParseError> {
    text.trim().parse().map_err(|_| ParseError::Usage(usage))
}

/// 1-based on input, 0-based in the draft.
fn item_index(text: &str, usage: &'static str) -> Result<usize, ParseError> {
    match number::<usize>(text, usage)? {
        0 => Err(ParseError::Usage(usage)),
        n => Ok(n - 1),
    }
}

// =============================================================================
// LOOP
// =============================================================================

pub async fn run<E: Entity>(mut manager: ListManager<E, ApiClient>, page: Page) -> Result<(), CliError> {
    tracing::info!(page = page.slug(), resource = E::RESOURCE, "shell: start");
    println!("{} ({}); type `help` for commands", page.title(), page.path());

    if let Err(e) = manager.load().await {
        report(&e);
    }
    flush(&mut manager);
    print!("{}", render::page(&manager.visible(), manager.lookups()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(prompt(&manager, page).as_bytes()).await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        if let Err(e) = execute(&mut manager, command).await {
            report(&e);
        }
        flush(&mut manager);
    }
    tracing::info!(page = page.slug(), "shell: end");
    Ok(())
}

async fn execute<E: Entity>(manager: &mut ListManager<E, ApiClient>, command: ShellCommand) -> Result<(), WorkflowError> {
    match command {
        ShellCommand::List => print_page(manager),
        ShellCommand::Search(term) => {
            manager.set_search(term);
            print_page(manager);
        }
        ShellCommand::Page(n) => {
            manager.go_to_page(n);
            print_page(manager);
        }
        ShellCommand::Next => {
            manager.next_page();
            print_page(manager);
        }
        ShellCommand::Previous => {
            manager.previous_page();
            print_page(manager);
        }
        ShellCommand::Sort(column) => match E::parse_sort_key(&column) {
            Some(key) => {
                let state = manager.sort_by(key);
                println!("sorted by {column} {}", state.direction.arrow());
                print_page(manager);
            }
            None => println!("{} cannot be sorted by `{column}`", E::PLURAL),
        },
        ShellCommand::Refresh => {
            manager.load().await?;
            print_page(manager);
        }
        ShellCommand::New => {
            let draft = manager.open_create()?;
            print!("{}", render::draft(&*draft));
        }
        ShellCommand::Edit(id) => {
            let draft = manager.open_edit(id)?;
            print!("{}", render::draft(&*draft));
        }
        ShellCommand::Set { field, value } => manager.set_field(&field, &value)?,
        ShellCommand::ItemAdd => {
            let index = manager.line_items_mut()?.add();
            println!("added item {}", index + 1);
        }
        ShellCommand::ItemRemove(index) => manager.line_items_mut()?.remove(index)?,
        ShellCommand::ItemSet { index, field, value } => manager.line_items_mut()?.set(index, &field, &value)?,
        ShellCommand::Show => match manager.draft() {
            Some(draft) => print!("{}", render::draft(draft)),
            None => println!("no form is open"),
        },
        ShellCommand::Save => {
            manager.submit().await?;
            print_page(manager);
        }
        ShellCommand::Cancel => manager.cancel()?,
        ShellCommand::Delete(id) => {
            manager.request_delete(id)?;
            println!("Delete {} {id}? (confirm/abort)", E::NOUN);
        }
        ShellCommand::Confirm => {
            manager.confirm_delete().await?;
            print_page(manager);
        }
        ShellCommand::Abort => manager.cancel_delete()?,
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn prompt<E: Entity>(manager: &ListManager<E, ApiClient>, page: Page) -> String {
    let mode = manager.mode();
    if mode.is_form_open() {
        let verb = if mode.session().is_some_and(|s| s.is_update()) { "edit" } else { "new" };
        format!("{}:{verb}> ", page.slug())
    } else if let Some(id) = mode.staged_delete() {
        format!("{}:delete {id}?> ", page.slug())
    } else {
        format!("{}> ", page.slug())
    }
}

fn print_page<E: Entity>(manager: &ListManager<E, ApiClient>) {
    print!("{}", render::page(&manager.visible(), manager.lookups()));
}

/// Validation and backend failures already queue a notice; only the
/// remaining errors are printed directly.
fn report(error: &WorkflowError) {
    match error {
        WorkflowError::Validation(_) | WorkflowError::Api(_) => {}
        other => println!("{}", render::error(other)),
    }
}

fn flush<E: Entity>(manager: &mut ListManager<E, ApiClient>) {
    for notice in manager.drain_notices() {
        println!("{}", render::notice(&notice));
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
