//! Canonical JSON response shapes.
//!
//! Success: `{"data": ...}`. Paginated success adds `count`, `total_pages`,
//! `current_page`, `has_next`, `has_prev`. Errors: `{"error": "..."}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{Page, PageRequest};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    /// Total number of matching records across all pages.
    pub count: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Paginated<T> {
    pub fn new(page: Page<T>, request: PageRequest) -> Self {
        let total_pages = page.total_pages(request.size());
        let current_page = request.page();
        Self {
            data: page.items,
            count: page.total,
            total_pages,
            current_page,
            has_next: u64::from(current_page) < total_pages,
            has_prev: current_page > 1,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(Data { data })).into_response()
}

pub fn paginated<T: Serialize>(page: Page<T>, request: PageRequest) -> Response {
    (StatusCode::OK, Json(Paginated::new(page, request))).into_response()
}

/// `{"data": "OK"}` with 200, the answer to a successful PUT.
pub fn updated() -> Response {
    success(StatusCode::OK, "OK")
}

/// `{"data": "OK"}` with 204, the answer to a successful DELETE.
pub fn deleted() -> Response {
    success(StatusCode::NO_CONTENT, "OK")
}

/// `{"data": []}`, returned for search terms too short to run.
pub fn empty_list() -> Response {
    success(StatusCode::OK, Vec::<()>::new())
}

pub fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}
