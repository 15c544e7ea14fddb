//! Category endpoints, addressed by slug.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use domain::{Category, Validate};

use crate::envelope;
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query, RequestContext};
use crate::middleware::CurrentUser;
use crate::query::{self, Params};
use crate::state::AppState;

/// GET /api/category
#[tracing::instrument(name = "categories.list.handler", skip_all)]
pub async fn list(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let request = query::page_request(&params, state.page_size);
    let page = state.categories.list(&ctx, request).await?;
    Ok(envelope::paginated(page, request))
}

/// POST /api/category
#[tracing::instrument(name = "categories.create.handler", skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    JsonBody(category): JsonBody<Category>,
) -> Result<Response, ApiError> {
    category.validate()?;
    let slug = state.categories.create(&ctx, category).await?;
    Ok(envelope::success(StatusCode::CREATED, slug))
}

/// GET /api/category/{slug}
#[tracing::instrument(name = "categories.get.handler", skip_all, fields(slug = %slug))]
pub async fn get(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let category = state.categories.get(&ctx, &slug).await?;
    Ok(envelope::success(StatusCode::OK, category))
}

/// PUT /api/category/{slug}
#[tracing::instrument(name = "categories.update.handler", skip_all, fields(slug = %slug))]
pub async fn update(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path(slug): Path<String>,
    JsonBody(mut category): JsonBody<Category>,
) -> Result<Response, ApiError> {
    category.slug.clone_from(&slug);
    category.validate()?;
    state.categories.update(&ctx, &slug, category).await?;
    Ok(envelope::updated())
}

/// DELETE /api/category/{slug}
#[tracing::instrument(name = "categories.delete.handler", skip_all, fields(slug = %slug))]
pub async fn delete(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    state.categories.delete(&ctx, &slug).await?;
    Ok(envelope::deleted())
}

/// GET /api/category/{slug}/items
///
/// `sort` and every non-pagination key are forwarded to storage untouched.
#[tracing::instrument(name = "categories.items.handler", skip_all, fields(slug = %slug))]
pub async fn items(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(slug): Path<String>,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let query = query::list_query(&params, state.page_size);
    let request = query.page;
    let page = state.categories.items(&ctx, &slug, query).await?;
    Ok(envelope::paginated(page, request))
}

/// GET /api/category/filters/{slug}
#[tracing::instrument(name = "categories.filters.handler", skip_all, fields(slug = %slug))]
pub async fn filters(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let filters = state.categories.filters(&ctx, &slug).await?;
    Ok(envelope::success(StatusCode::OK, filters))
}

/// GET /api/category/search
#[tracing::instrument(name = "categories.search.handler", skip_all)]
pub async fn search(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let Some(q) = query::search_term(&params) else {
        return Ok(envelope::empty_list());
    };
    let request = query::search_page(&params);
    let page = state.categories.search(&ctx, q, request).await?;
    Ok(envelope::paginated(page, request))
}

/// GET /api/category/filters/search
#[tracing::instrument(name = "categories.search_filters.handler", skip_all)]
pub async fn search_filters(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let Some(q) = query::search_term(&params) else {
        return Ok(envelope::empty_list());
    };
    let request = query::search_page(&params);
    let page = state.categories.search_filters(&ctx, q, request).await?;
    Ok(envelope::paginated(page, request))
}
