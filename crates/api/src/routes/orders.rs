//! Customer orders. Every order belongs to the user that placed it; other
//! users see it as missing.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use common::{CallContext, UserId};
use domain::{Order, Validate};

use crate::envelope;
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, RequestContext, parse_u64};
use crate::middleware::{CurrentUser, bearer_token};
use crate::state::AppState;

/// POST /api/order
///
/// Not behind the auth middleware: the owner is resolved here from the
/// bearer token so that an empty identity can be told apart (400) from a
/// rejected token (401).
#[tracing::instrument(name = "orders.create.handler", skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    headers: HeaderMap,
    JsonBody(mut order): JsonBody<Order>,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers)?;
    let caller = state
        .identity
        .resolve_token(&ctx, token)
        .await
        .map_err(|err| ApiError::Unauthorized(err.to_string()))?;
    if caller.is_empty() {
        return Err(ApiError::BadRequest("empty user identity".to_string()));
    }
    let owner = UserId::parse(&caller)
        .map_err(|_| ApiError::Unauthorized("invalid user identity".to_string()))?;

    order.validate()?;
    order.user_id = Some(owner);
    let id = state.orders.create(&ctx, order).await?;
    Ok(envelope::success(StatusCode::CREATED, id))
}

/// GET /api/order
#[tracing::instrument(name = "orders.list.handler", skip_all)]
pub async fn list(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    CurrentUser(uid): CurrentUser,
) -> Result<Response, ApiError> {
    let orders = state.orders.list_by_user(&ctx, uid).await?;
    Ok(envelope::success(StatusCode::OK, orders))
}

/// Loads order `id` if it belongs to `uid`.
async fn owned(
    state: &AppState,
    ctx: &CallContext,
    uid: UserId,
    id: u64,
) -> Result<Order, ApiError> {
    let order = state.orders.get(ctx, id).await?;
    if order.user_id != Some(uid) {
        return Err(ApiError::NotFound);
    }
    Ok(order)
}

/// GET /api/order/{id}
#[tracing::instrument(name = "orders.get.handler", skip_all, fields(id = %id))]
pub async fn get(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    CurrentUser(uid): CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let order = owned(&state, &ctx, uid, parse_u64(&id)?).await?;
    Ok(envelope::success(StatusCode::OK, order))
}

/// PUT /api/order/{id}
#[tracing::instrument(name = "orders.update.handler", skip_all, fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    CurrentUser(uid): CurrentUser,
    Path(id): Path<String>,
    JsonBody(order): JsonBody<Order>,
) -> Result<Response, ApiError> {
    let id = parse_u64(&id)?;
    order.validate()?;
    owned(&state, &ctx, uid, id).await?;
    state.orders.update(&ctx, id, order).await?;
    Ok(envelope::updated())
}

/// DELETE /api/order/{id}
#[tracing::instrument(name = "orders.delete.handler", skip_all, fields(id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    CurrentUser(uid): CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_u64(&id)?;
    owned(&state, &ctx, uid, id).await?;
    state.orders.delete(&ctx, id).await?;
    Ok(envelope::deleted())
}
