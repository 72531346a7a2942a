//! Entities — record types, form drafts, and per-entity configuration.
//!
//! DESIGN
//! ======
//! An [`Entity`] is a flat record the backend owns (ids are never minted
//! client-side). Its [`Draft`] mirrors the edit form: raw text fields that
//! only become a typed JSON payload after validation passes. Everything the
//! generic workflow needs to know about a record type (resource path, nouns
//! for notices, search fields, table columns, sibling lookups, sort keys)
//! is declared here instead of being repeated per page.

pub mod category;
pub mod customer;
pub mod product;
pub mod purchase;
pub mod sale;
pub mod user;
pub mod vendor;

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::lookup::{LookupKind, Lookups};
use crate::validation::{FieldError, ValidationErrors};

/// Backend-assigned record identifier.
pub type EntityId = i64;

/// Units offered for purchase quantities and sale line items.
pub const UNITS: &[&str] = &["Kg", "Litre", "Pack", "Pieces"];

// =============================================================================
// ENTITY
// =============================================================================

/// A backend record type managed by a list workflow.
pub trait Entity: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    /// Form state for create/edit.
    type Draft: Draft;

    /// Sort keys offered by the table; [`Unsortable`] for plain tables.
    type SortKey: Copy + Debug + PartialEq + Eq + Send + Sync;

    /// Resource path segment, e.g. `product-categories`.
    const RESOURCE: &'static str;
    /// Singular noun for notices, e.g. `product category`.
    const NOUN: &'static str;
    /// Plural noun for notices, e.g. `product categories`.
    const PLURAL: &'static str;
    /// Table headers, matching [`Entity::cells`].
    const COLUMNS: &'static [&'static str];
    /// Sibling collections needed to render or search rows.
    const LOOKUPS: &'static [LookupKind] = &[];

    fn id(&self) -> EntityId;

    /// Primary display label, used when other entities reference this one.
    fn label(&self) -> &str;

    /// Fields matched by the search box. `None` never matches.
    fn search_fields<'a>(&'a self, lookups: &'a Lookups) -> Vec<Option<&'a str>>;

    /// One rendered table row.
    fn cells(&self, lookups: &Lookups) -> Vec<String>;

    /// Draft pre-filled from this record for editing.
    fn to_draft(&self) -> Self::Draft;

    /// Sort key named by a column header, for entities that sort.
    fn parse_sort_key(_column: &str) -> Option<Self::SortKey> {
        None
    }

    /// Ordering for `key`. Only meaningful for sortable entities.
    fn compare(&self, _other: &Self, _key: Self::SortKey) -> Ordering {
        Ordering::Equal
    }
}

/// Sort key for entities whose tables are not sortable. It has no values,
/// so a sort can never be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsortable {}

// =============================================================================
// DRAFT
// =============================================================================

/// Mutable staging record behind a create/edit form.
pub trait Draft: Clone + Debug + Default + PartialEq + Send + Sync {
    /// Typed request body produced from a valid draft.
    type Payload: Serialize + Send + Sync;

    /// Editable field names, in form order.
    const FIELDS: &'static [&'static str];

    /// Assign a field from form text.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] for unknown or read-only fields.
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError>;

    /// Current text of a field, for display.
    fn field(&self, field: &str) -> Option<String>;

    /// Every presence/length/shape problem in the draft.
    fn validate(&self) -> ValidationErrors;

    /// Validate and convert into the request body.
    ///
    /// # Errors
    ///
    /// Returns the draft's [`ValidationErrors`] when any check fails.
    fn payload(&self) -> Result<Self::Payload, ValidationErrors>;

    /// Line items, for drafts that own them.
    fn line_items(&self) -> Option<&sale::LineItems> {
        None
    }

    /// Line-item editor, for drafts that own one.
    fn line_items_mut(&mut self) -> Option<&mut sale::LineItems> {
        None
    }
}

/// Shared `field()` helper: clone a text field.
pub(crate) fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Shared `cells()` helper: render an optional attribute.
pub(crate) fn cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Text attribute the backend may send as a JSON number (bill and invoice
/// numbers, phone numbers). `null` and a missing field read as empty.
pub(crate) fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_text(deserializer)?.unwrap_or_default())
}

/// Optional variant of [`lenient_text`].
pub(crate) fn lenient_opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
