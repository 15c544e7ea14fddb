//! Query-string parsing for pagination, sort, and filters.
//!
//! Parsing never fails: unparseable or out-of-range values fall back to
//! defaults, so the window handed to controllers is always at least 1.

use std::collections::HashMap;

use common::{Filters, ListQuery, MIN_QUERY_LEN, PageRequest, SEARCH_PAGE_SIZE};

/// Raw query-string parameters.
pub type Params = HashMap<String, String>;

const RESERVED: [&str; 4] = ["page", "size", "sort", "q"];

fn positive(params: &Params, key: &str) -> Option<u32> {
    params
        .get(key)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value >= 1)
}

/// Page window with `default_size` when `size` is missing or invalid.
pub fn page_request(params: &Params, default_size: u32) -> PageRequest {
    PageRequest::new(
        positive(params, "page").unwrap_or(1),
        positive(params, "size").unwrap_or(default_size),
    )
}

/// Page window for search endpoints.
pub fn search_page(params: &Params) -> PageRequest {
    page_request(params, SEARCH_PAGE_SIZE)
}

/// Page window, sort key, and every non-reserved key as a filter.
pub fn list_query(params: &Params, default_size: u32) -> ListQuery {
    let filters: Filters = params
        .iter()
        .filter(|(key, _)| !RESERVED.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    ListQuery {
        page: page_request(params, default_size),
        sort: params.get("sort").cloned(),
        filters,
    }
}

/// The search term, if it is long enough to run.
pub fn search_term(params: &Params) -> Option<&str> {
    params
        .get("q")
        .map(String::as_str)
        .filter(|q| q.chars().count() >= MIN_QUERY_LEN)
}
