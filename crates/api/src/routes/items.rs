//! Item (product) endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use common::CallContext;
use domain::{Item, Label, Validate};

use crate::envelope;
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query, RequestContext, parse_uuid};
use crate::middleware::CurrentUser;
use crate::query::{self, Params};
use crate::state::AppState;

/// GET /api/item
#[tracing::instrument(name = "items.list.handler", skip_all)]
pub async fn list(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let query = query::list_query(&params, state.page_size);
    let request = query.page;
    let page = state.items.list(&ctx, query).await?;
    Ok(envelope::paginated(page, request))
}

/// POST /api/item
#[tracing::instrument(name = "items.create.handler", skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    JsonBody(item): JsonBody<Item>,
) -> Result<Response, ApiError> {
    item.validate()?;
    let id = state.items.create(&ctx, item).await?;
    Ok(envelope::success(StatusCode::CREATED, id))
}

/// GET /api/item/{uid}
#[tracing::instrument(name = "items.get.handler", skip_all, fields(id = %id))]
pub async fn get(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;
    let item = state.items.get(&ctx, id).await?;
    Ok(envelope::success(StatusCode::OK, item))
}

/// PUT /api/item/{uid}
#[tracing::instrument(name = "items.update.handler", skip_all, fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path(id): Path<String>,
    JsonBody(item): JsonBody<Item>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;
    item.validate()?;
    state.items.update(&ctx, id, item).await?;
    Ok(envelope::updated())
}

/// DELETE /api/item/{uid}
#[tracing::instrument(name = "items.delete.handler", skip_all, fields(id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;
    state.items.delete(&ctx, id).await?;
    Ok(envelope::deleted())
}

/// GET /api/item/{uid}/related
#[tracing::instrument(name = "items.related.handler", skip_all, fields(id = %id))]
pub async fn related(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id)?;
    let items = state.items.related(&ctx, id).await?;
    Ok(envelope::success(StatusCode::OK, items))
}

/// GET /api/item/search
#[tracing::instrument(name = "items.search.handler", skip_all)]
pub async fn search(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let Some(q) = query::search_term(&params) else {
        return Ok(envelope::empty_list());
    };
    let request = query::search_page(&params);
    let page = state.items.search(&ctx, q, request).await?;
    Ok(envelope::paginated(page, request))
}

/// GET /api/item/attr/search
#[tracing::instrument(name = "items.search_by_attribute.handler", skip_all)]
pub async fn search_by_attribute(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    let Some(q) = query::search_term(&params) else {
        return Ok(envelope::empty_list());
    };
    let request = query::search_page(&params);
    let page = state.items.search_by_attribute(&ctx, q, request).await?;
    Ok(envelope::paginated(page, request))
}

/// GET /api/hits
#[tracing::instrument(name = "items.hits.handler", skip_all)]
pub async fn hits(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    labelled(&state, &ctx, Label::Hit, &params).await
}

/// GET /api/recs
#[tracing::instrument(name = "items.recs.handler", skip_all)]
pub async fn recs(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Query(params): Query<Params>,
) -> Result<Response, ApiError> {
    labelled(&state, &ctx, Label::Rec, &params).await
}

async fn labelled(
    state: &AppState,
    ctx: &CallContext,
    label: Label,
    params: &Params,
) -> Result<Response, ApiError> {
    let request = query::page_request(params, state.page_size);
    let page = state.items.labelled(ctx, label, request).await?;
    Ok(envelope::paginated(page, request))
}
