//! Filter, sort and paginate: the derived views of a fetched collection.
//!
//! Nothing here owns state. The workflow recomputes the visible page from its
//! items, search term, sort selection and page number every time it is asked.

use std::cmp::Ordering;

// =============================================================================
// FILTER
// =============================================================================

/// Case-insensitive substring match of `term` against any present field.
/// An empty term matches everything; absent fields never match.
#[must_use]
pub fn matches(fields: &[Option<&str>], term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the items whose search fields match `term`, in their original order.
pub fn filter<'a, T, F>(items: &'a [T], term: &str, mut fields: F) -> Vec<&'a T>
where
    F: FnMut(&'a T) -> Vec<Option<&'a str>>,
{
    items
        .iter()
        .filter(|item| matches(&fields(*item), term))
        .collect()
}

// =============================================================================
// SORT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// The active sort column and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: Direction,
}

impl<K: Copy + PartialEq> SortState<K> {
    #[must_use]
    pub fn ascending(key: K) -> Self {
        Self { key, direction: Direction::Ascending }
    }

    /// Next state after a header click: the same key flips direction, a
    /// different key starts ascending.
    #[must_use]
    pub fn select(current: Option<Self>, key: K) -> Self {
        match current {
            Some(state) if state.key == key => Self { key, direction: state.direction.toggled() },
            _ => Self::ascending(key),
        }
    }
}

/// Stable sort by `state`; equal elements keep their relative order in both
/// directions.
pub fn sort<T, K, F>(items: &mut [T], state: SortState<K>, compare: F)
where
    K: Copy,
    F: Fn(&T, &T, K) -> Ordering,
{
    items.sort_by(|a, b| {
        let ordering = compare(a, b, state.key);
        match state.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
}

// =============================================================================
// PAGINATE
// =============================================================================

/// `ceil(len / page_size)`; zero for an empty collection.
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page into `[1, max(total_pages, 1)]`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One page of a filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<T> {
    /// Clamped 1-based page number.
    pub page: usize,
    pub total_pages: usize,
    /// Size of the whole filtered view.
    pub total_items: usize,
    pub items: Vec<T>,
}

impl<T> PageView<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `items` to the (clamped) `page`.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> PageView<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page = clamp_page(page, total_pages);
    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    PageView {
        page,
        total_pages,
        total_items: items.len(),
        items: items[start..end].to_vec(),
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
