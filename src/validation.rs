//! Client-side form validation.
//!
//! Drafts hold raw text the way a form does; these helpers check presence,
//! length, numeric shape and choice membership before anything is sent.
//! Every failed check adds one human-readable line, so a single notice can
//! enumerate every problem at once.

use std::str::FromStr;

use rust_decimal::Decimal;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::entity::EntityId;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

// =============================================================================
// ERRORS
// =============================================================================

/// Ordered list of validation problems for one draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", .0.join("\n"))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// `Ok(())` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one problem was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Record `message` unless `value` has non-whitespace content.
    pub fn require(&mut self, value: &str, message: &str) {
        if is_blank(value) {
            self.push(message);
        }
    }

    /// Record an error when `value` is longer than `max` characters.
    pub fn max_len(&mut self, value: &str, max: usize, label: &str) {
        if value.chars().count() > max {
            self.push(format!("{label} must be at most {max} characters"));
        }
    }

    /// Record `message` when non-blank `value` is not a `YYYY-MM-DD` date.
    pub fn date(&mut self, value: &str, message: &str) {
        if !is_blank(value) && !is_iso_date(value) {
            self.push(message);
        }
    }

    /// Record `message` unless `value` is one of `choices`.
    pub fn one_of(&mut self, value: &str, choices: &[&str], message: &str) {
        if !choices.contains(&value.trim()) {
            self.push(message);
        }
    }
}

/// Errors from assigning a draft field by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    Unknown(String),
    #[error("field `{0}` is computed and cannot be edited")]
    ReadOnly(&'static str),
    #[error("line item {0} does not exist")]
    NoSuchItem(usize),
    #[error("a sale needs at least one line item")]
    LastItem,
}

// =============================================================================
// PARSING
// =============================================================================

#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Trimmed text, or `None` when blank.
#[must_use]
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[must_use]
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

#[must_use]
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// A backend identifier chosen from a select: a positive integer.
#[must_use]
pub fn parse_id(value: &str) -> Option<EntityId> {
    parse_int(value).filter(|id| *id > 0)
}

/// Calendar date in the `YYYY-MM-DD` form date inputs produce.
#[must_use]
pub fn is_iso_date(value: &str) -> bool {
    Date::parse(value.trim(), ISO_DATE).is_ok()
}

/// Today's UTC date as `YYYY-MM-DD`.
#[must_use]
pub fn today() -> String {
    OffsetDateTime::now_utc()
        .date()
        .format(ISO_DATE)
        .unwrap_or_default()
}

/// Loose shape check: one `@`, non-empty local part, dotted domain.
#[must_use]
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
