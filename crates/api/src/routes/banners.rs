//! Banners attached to catalog entities, forwarded to the banner service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use domain::{Banner, Validate};

use crate::envelope;
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, RequestContext};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// POST /api/banner/{name}/{pk}
#[tracing::instrument(name = "banners.create.handler", skip_all, fields(name = %name, pk = %pk))]
pub async fn create(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path((name, pk)): Path<(String, String)>,
    JsonBody(banner): JsonBody<Banner>,
) -> Result<Response, ApiError> {
    banner.validate()?;
    state.banners.create(&ctx, &name, &pk, banner).await?;
    Ok(envelope::success(StatusCode::CREATED, "OK"))
}

/// PUT /api/banner/{name}/{pk}
#[tracing::instrument(name = "banners.update.handler", skip_all, fields(name = %name, pk = %pk))]
pub async fn update(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path((name, pk)): Path<(String, String)>,
    JsonBody(banner): JsonBody<Banner>,
) -> Result<Response, ApiError> {
    banner.validate()?;
    state.banners.update(&ctx, &name, &pk, banner).await?;
    Ok(envelope::updated())
}

/// DELETE /api/banner/{name}/{pk}
#[tracing::instrument(name = "banners.delete.handler", skip_all, fields(name = %name, pk = %pk))]
pub async fn delete(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path((name, pk)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    state.banners.delete(&ctx, &name, &pk).await?;
    Ok(envelope::deleted())
}
