//! Per-user favorites. The user always comes from the authenticated caller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

use crate::envelope;
use crate::error::ApiError;
use crate::extract::{JsonBody, RequestContext};
use crate::middleware::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    #[serde(default)]
    pub item_id: Uuid,
}

impl FavoriteRequest {
    fn item_id(&self) -> Result<Uuid, ApiError> {
        if self.item_id.is_nil() {
            return Err(ApiError::BadRequest("missing uuid".to_string()));
        }
        Ok(self.item_id)
    }
}

/// GET /api/favorite
#[tracing::instrument(name = "favorites.list.handler", skip_all)]
pub async fn list(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    CurrentUser(uid): CurrentUser,
) -> Result<Response, ApiError> {
    let favorites = state.favorites.list(&ctx, uid).await?;
    Ok(envelope::success(StatusCode::OK, favorites))
}

/// POST /api/favorite
#[tracing::instrument(name = "favorites.add.handler", skip_all)]
pub async fn add(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    CurrentUser(uid): CurrentUser,
    JsonBody(request): JsonBody<FavoriteRequest>,
) -> Result<Response, ApiError> {
    let item_id = request.item_id()?;
    let favorite = state.favorites.add(&ctx, uid, item_id).await?;
    Ok(envelope::success(StatusCode::CREATED, favorite))
}

/// DELETE /api/favorite
#[tracing::instrument(name = "favorites.remove.handler", skip_all)]
pub async fn remove(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    CurrentUser(uid): CurrentUser,
    JsonBody(request): JsonBody<FavoriteRequest>,
) -> Result<Response, ApiError> {
    let item_id = request.item_id()?;
    state.favorites.remove(&ctx, uid, item_id).await?;
    Ok(envelope::deleted())
}
