//! Pagination window and result page shared by handlers and controllers.

use std::collections::HashMap;

use serde::Serialize;

/// Page size used by list endpoints unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 40;

/// Page size used by search endpoints.
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Search terms shorter than this (in codepoints) are not forwarded.
pub const MIN_QUERY_LEN: usize = 3;

/// Free-form filters taken from the query string, interpreted by storage.
pub type Filters = HashMap<String, String>;

/// A 1-based page window. Both fields are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Builds a window, raising zero values to 1.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of records preceding this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.size as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Listing parameters forwarded verbatim to storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: PageRequest,
    pub sort: Option<String>,
    pub filters: Filters,
}

/// One page of results plus the total number of matching records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Slices `all` down to the requested window.
    pub fn from_slice(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.size() as usize)
            .collect();
        Self { items, total }
    }

    /// Number of pages needed to show every record at `size` per page.
    pub fn total_pages(&self, size: u32) -> u64 {
        self.total.div_ceil(u64::from(size.max(1)))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
