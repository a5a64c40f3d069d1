//! Local collection processing.
//!
//! A listing is fetched once and then searched, filtered, sorted and paged in
//! memory. [`process`] is the pure pipeline; [`CollectionView`] holds the
//! mutable state around it (raw data, filters, sort key, page and fetch
//! status).

pub mod debounce;
pub mod filters;
pub mod sort;
pub mod view;

use std::cmp::Ordering;

pub use debounce::{DEFAULT_DEBOUNCE_MS, Debouncer};
pub use filters::{PriceBucket, PriceThresholds, StatusBucket};
pub use sort::SortKey;
pub use view::{CollectionView, FetchState, FetchTicket, ViewStatus};

/// A single filter condition.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Ordering used by the sort stage.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Active filter conditions, keyed by name so one can be replaced or removed
/// without touching the others. Conditions are AND-ed.
pub struct Filters<T> {
    slots: Vec<(String, Predicate<T>)>,
}

impl<T> Default for Filters<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> Filters<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the condition named `name`.
    pub fn set(&mut self, name: &str, predicate: Predicate<T>) {
        if let Some(slot) = self.slots.iter_mut().find(|(n, _)| n == name) {
            slot.1 = predicate;
        } else {
            self.slots.push((name.to_string(), predicate));
        }
    }

    /// Remove the condition named `name`. Returns whether one was present.
    pub fn clear(&mut self, name: &str) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(n, _)| n != name);
        self.slots.len() != before
    }

    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True when every condition holds. No conditions keeps everything.
    pub fn matches(&self, item: &T) -> bool {
        self.slots.iter().all(|(_, predicate)| predicate(item))
    }
}

impl<T> std::fmt::Debug for Filters<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filters")
            .field("names", &self.names())
            .finish()
    }
}

/// One page of a processed collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    pub items: Vec<T>,
    /// One-based page actually shown, after clamping.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Items that passed the filters, across all pages.
    pub total_matches: usize,
}

impl<T> Slice<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages needed for `matches` items.
pub fn total_pages(matches: usize, page_size: usize) -> usize {
    matches.div_ceil(page_size.max(1))
}

/// Clamp a requested one-based page into `1..=total_pages` (1 when there
/// are no pages).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Filter, stably sort and paginate `raw`.
///
/// `page` is one-based and clamped to the valid range.
pub fn process<T: Clone>(
    raw: &[T],
    filters: &Filters<T>,
    sort: Option<&Comparator<T>>,
    page: usize,
    page_size: usize,
) -> Slice<T> {
    let page_size = page_size.max(1);

    let mut matched: Vec<&T> = raw.iter().filter(|item| filters.matches(item)).collect();
    if let Some(compare) = sort {
        matched.sort_by(|a, b| compare(a, b));
    }

    let total_matches = matched.len();
    let total_pages = total_pages(total_matches, page_size);
    let page = clamp_page(page, total_pages);
    let items = matched
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    Slice {
        items,
        page,
        page_size,
        total_pages,
        total_matches,
    }
}
