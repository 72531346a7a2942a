//! Plain-text rendering for tables, forms and notices.

use std::fmt::Write as _;

use stockroom::dashboard::Card;
use stockroom::entity::{Draft, Entity};
use stockroom::listing::PageView;
use stockroom::lookup::Lookups;
use stockroom::navigation::Page;
use stockroom::{Notice, NoticeLevel};

pub const EMPTY_TABLE: &str = "No records found.";

/// Left-aligned columns separated by two spaces, header underlined.
pub fn table(columns: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return format!("{EMPTY_TABLE}\n");
    }
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, columns.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// One page of records plus the pager line.
pub fn page<E: Entity>(view: &PageView<&E>, lookups: &Lookups) -> String {
    let rows: Vec<Vec<String>> = view.items.iter().map(|item| item.cells(lookups)).collect();
    let mut out = table(E::COLUMNS, &rows);
    out.push_str(&pager(view));
    out
}

/// `Page 2 of 3 · 12 records · [prev] [next]`; arrows only when usable.
pub fn pager<T>(view: &PageView<T>) -> String {
    let mut line = format!(
        "Page {} of {} · {} record{}",
        view.page,
        view.total_pages.max(1),
        view.total_items,
        if view.total_items == 1 { "" } else { "s" }
    );
    if view.has_previous() {
        line.push_str(" · [prev]");
    }
    if view.has_next() {
        line.push_str(" · [next]");
    }
    line.push('\n');
    line
}

/// The open form, field by field, then any line items.
pub fn draft<D: Draft>(draft: &D) -> String {
    let width = D::FIELDS.iter().map(|f| f.len()).max().unwrap_or(0);
    let mut out = String::new();
    for field in D::FIELDS {
        let value = draft.field(field).unwrap_or_default();
        let _ = writeln!(out, "{field:<width$}  {value}");
    }
    if let Some(items) = draft.line_items() {
        let rows: Vec<Vec<String>> = items
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                vec![
                    (index + 1).to_string(),
                    row.product_id.clone(),
                    row.quantity.clone(),
                    row.unit.clone(),
                    row.rate.clone(),
                    format!("{:.2}", row.amount()),
                ]
            })
            .collect();
        out.push('\n');
        out.push_str(&table(&["#", "Product", "Quantity", "Unit", "Rate", "Amount"], &rows));
    }
    out
}

pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✔ {}", notice.message),
        NoticeLevel::Error => format!("✖ {}", notice.message),
        NoticeLevel::Validation => {
            let mut out = notice.title.clone();
            for line in notice.message.lines() {
                let _ = write!(out, "\n  - {line}");
            }
            out
        }
    }
}

pub fn error(error: &impl std::fmt::Display) -> String {
    format!("✖ {error}")
}

pub fn cards(cards: &[Card]) -> String {
    let width = cards.iter().map(|c| c.title.len()).max().unwrap_or(0);
    cards
        .iter()
        .map(|card| format!("{:<width$}  {}\n", card.title, card.value))
        .collect()
}

pub fn pages() -> String {
    let rows: Vec<Vec<String>> = Page::ALL
        .iter()
        .map(|page| vec![page.slug().to_owned(), page.title().to_owned(), page.path().to_owned()])
        .collect();
    table(&["Command", "Page", "Route"], &rows)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
