//! Mutable view state over a locally processed collection.

use super::{Comparator, Filters, Predicate, Slice, process};
use crate::error::ApiError;
use crate::notice::Notice;

/// Handle for one refresh. Only the most recently issued ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// What a screen should show. Exactly one applies at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Error(String),
    Ready { empty: bool },
}

/// Raw collection plus filter, sort and page state.
///
/// Changing a filter or the sort key returns to page 1. Changing the page
/// leaves filters alone. None of these trigger a fetch.
pub struct CollectionView<T> {
    raw: Vec<T>,
    filters: Filters<T>,
    sort: Option<Comparator<T>>,
    page: usize,
    page_size: usize,
    state: FetchState,
    issued: u64,
}

impl<T: Clone> CollectionView<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            raw: Vec::new(),
            filters: Filters::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
            state: FetchState::Idle,
            issued: 0,
        }
    }

    /// View over an already fetched collection.
    pub fn with_items(items: Vec<T>, page_size: usize) -> Self {
        let mut view = Self::new(page_size);
        view.raw = items;
        view.state = FetchState::Loaded;
        view
    }

    pub fn raw(&self) -> &[T] {
        &self.raw
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filters(&self) -> &Filters<T> {
        &self.filters
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.state
    }

    pub fn set_filter(&mut self, name: &str, predicate: Predicate<T>) {
        self.filters.set(name, predicate);
        self.page = 1;
    }

    pub fn clear_filter(&mut self, name: &str) {
        self.filters.clear(name);
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.page = 1;
    }

    pub fn set_sort(&mut self, comparator: Option<Comparator<T>>) {
        self.sort = comparator;
        self.page = 1;
    }

    /// One-based. Out-of-range values are clamped when the slice is derived.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// The current page, derived from raw data and view state.
    pub fn visible(&self) -> Slice<T> {
        process(
            &self.raw,
            &self.filters,
            self.sort.as_ref(),
            self.page,
            self.page_size,
        )
    }

    /// Start a refresh. Any ticket issued earlier becomes stale.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state = FetchState::Loading;
        FetchTicket(self.issued)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Commit the outcome of a refresh.
    ///
    /// Stale tickets are ignored and `false` is returned. On failure the
    /// previous items stay in place.
    pub fn finish_refresh(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<T>, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale response"
            );
            return false;
        }

        match result {
            Ok(items) => {
                self.raw = items;
                self.state = FetchState::Loaded;
            }
            Err(e) => {
                tracing::debug!("refresh failed, keeping {} items: {e}", self.raw.len());
                self.state = FetchState::Failed(Notice::from_error(&e).message);
            }
        }
        true
    }

    pub fn status(&self) -> ViewStatus {
        match &self.state {
            FetchState::Loading => ViewStatus::Loading,
            FetchState::Failed(message) => ViewStatus::Error(message.clone()),
            FetchState::Idle | FetchState::Loaded => ViewStatus::Ready {
                empty: self.visible().is_empty(),
            },
        }
    }
}

impl<T> std::fmt::Debug for CollectionView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionView")
            .field("items", &self.raw.len())
            .field("filters", &self.filters)
            .field("sorted", &self.sort.is_some())
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("state", &self.state)
            .finish()
    }
}
