//! Promotion endpoints, addressed by slug.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use domain::{Promotion, Validate};

use crate::envelope;
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query, RequestContext};
use crate::middleware::CurrentUser;
use crate::query::{self, Params};
use crate::state::AppState;

/// GET /api/promotions
#[tracing::instrument(name = "promotions.list.handler", skip_all)]
pub async fn list(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let request = query::page_request(&params, state.page_size);
    let page = state.promotions.list(&ctx, request).await?;
    Ok(envelope::paginated(page, request))
}

/// POST /api/promotions
#[tracing::instrument(name = "promotions.create.handler", skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    JsonBody(promotion): JsonBody<Promotion>,
) -> Result<Response, ApiError> {
    promotion.validate()?;
    let slug = state.promotions.create(&ctx, promotion).await?;
    Ok(envelope::success(StatusCode::CREATED, slug))
}

/// GET /api/promotions/{slug}
#[tracing::instrument(name = "promotions.get.handler", skip_all, fields(slug = %slug))]
pub async fn get(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let promotion = state.promotions.get(&ctx, &slug).await?;
    Ok(envelope::success(StatusCode::OK, promotion))
}

/// PUT /api/promotions/{slug}
#[tracing::instrument(name = "promotions.update.handler", skip_all, fields(slug = %slug))]
pub async fn update(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path(slug): Path<String>,
    JsonBody(mut promotion): JsonBody<Promotion>,
) -> Result<Response, ApiError> {
    promotion.slug.clone_from(&slug);
    promotion.validate()?;
    state.promotions.update(&ctx, &slug, promotion).await?;
    Ok(envelope::updated())
}

/// DELETE /api/promotions/{slug}
#[tracing::instrument(name = "promotions.delete.handler", skip_all, fields(slug = %slug))]
pub async fn delete(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    state.promotions.delete(&ctx, &slug).await?;
    Ok(envelope::deleted())
}

/// GET /api/promotions/items/{slug}
#[tracing::instrument(name = "promotions.items.handler", skip_all, fields(slug = %slug))]
pub async fn items(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(slug): Path<String>,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let request = query::page_request(&params, state.page_size);
    let page = state.promotions.items(&ctx, &slug, request).await?;
    Ok(envelope::paginated(page, request))
}

/// GET /api/promotions/search
#[tracing::instrument(name = "promotions.search.handler", skip_all)]
pub async fn search(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let Some(q) = query::search_term(&params) else {
        return Ok(envelope::empty_list());
    };
    let request = query::search_page(&params);
    let page = state.promotions.search(&ctx, q, request).await?;
    Ok(envelope::paginated(page, request))
}
