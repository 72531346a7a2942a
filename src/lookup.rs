//! Cross-entity display resolution.
//!
//! Purchases and sales store foreign ids; tables show names. Each sibling
//! collection is fetched separately and folded into a keyed index once per
//! fetch, so rendering a row is a map lookup rather than a scan. Ids with no
//! match render as a fixed "Unknown X" placeholder.

use std::collections::HashMap;

use tracing::info;

use crate::api::{self, ApiError, ResourceApi};
use crate::entity::category::Category;
use crate::entity::customer::Customer;
use crate::entity::product::Product;
use crate::entity::vendor::Vendor;
use crate::entity::{Entity, EntityId};

// =============================================================================
// KINDS
// =============================================================================

/// Sibling collections an entity can resolve ids against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Categories,
    Products,
    Vendors,
    Customers,
}

impl LookupKind {
    /// Label shown when an id has no match.
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Categories => "Unknown Category",
            Self::Products => "Unknown Product",
            Self::Vendors => "Unknown Vendor",
            Self::Customers => "Unknown Customer",
        }
    }

    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Categories => Category::PLURAL,
            Self::Products => Product::PLURAL,
            Self::Vendors => Vendor::PLURAL,
            Self::Customers => Customer::PLURAL,
        }
    }
}

// =============================================================================
// INDEX
// =============================================================================

/// id → display label for one sibling collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    labels: HashMap<EntityId, String>,
}

impl LabelIndex {
    #[must_use]
    pub fn from_entities<E: Entity>(items: &[E]) -> Self {
        Self {
            labels: items
                .iter()
                .map(|item| (item.id(), item.label().to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Entries ordered by id, for select-style choice lists.
    #[must_use]
    pub fn entries(&self) -> Vec<(EntityId, &str)> {
        let mut entries: Vec<_> = self
            .labels
            .iter()
            .map(|(id, label)| (*id, label.as_str()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}

impl FromIterator<(EntityId, String)> for LabelIndex {
    fn from_iter<I: IntoIterator<Item = (EntityId, String)>>(iter: I) -> Self {
        Self { labels: iter.into_iter().collect() }
    }
}

// =============================================================================
// LOOKUPS
// =============================================================================

/// All sibling indexes a workflow may need.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    categories: LabelIndex,
    products: LabelIndex,
    vendors: LabelIndex,
    customers: LabelIndex,
}

impl Lookups {
    #[must_use]
    pub fn index(&self, kind: LookupKind) -> &LabelIndex {
        match kind {
            LookupKind::Categories => &self.categories,
            LookupKind::Products => &self.products,
            LookupKind::Vendors => &self.vendors,
            LookupKind::Customers => &self.customers,
        }
    }

    /// Replace one index wholesale.
    pub fn replace(&mut self, kind: LookupKind, index: LabelIndex) {
        match kind {
            LookupKind::Categories => self.categories = index,
            LookupKind::Products => self.products = index,
            LookupKind::Vendors => self.vendors = index,
            LookupKind::Customers => self.customers = index,
        }
    }

    #[must_use]
    pub fn with(mut self, kind: LookupKind, index: LabelIndex) -> Self {
        self.replace(kind, index);
        self
    }

    /// Resolved label, or the kind's placeholder.
    #[must_use]
    pub fn label(&self, kind: LookupKind, id: EntityId) -> &str {
        self.index(kind).get(id).unwrap_or(kind.placeholder())
    }

    /// Resolved label only when the id is known.
    #[must_use]
    pub fn find(&self, kind: LookupKind, id: EntityId) -> Option<&str> {
        self.index(kind).get(id)
    }
}

/// Fetch one sibling collection and index it.
///
/// # Errors
///
/// Returns the list call's [`ApiError`].
pub async fn fetch<A: ResourceApi + ?Sized>(api: &A, kind: LookupKind) -> Result<LabelIndex, ApiError> {
    let index = match kind {
        LookupKind::Categories => LabelIndex::from_entities(&api::list::<Category, A>(api).await?),
        LookupKind::Products => LabelIndex::from_entities(&api::list::<Product, A>(api).await?),
        LookupKind::Vendors => LabelIndex::from_entities(&api::list::<Vendor, A>(api).await?),
        LookupKind::Customers => LabelIndex::from_entities(&api::list::<Customer, A>(api).await?),
    };
    info!(?kind, count = index.len(), "lookup: index rebuilt");
    Ok(index)
}

#[cfg(test)]
#[path = "lookup_test.rs"]
mod tests;
