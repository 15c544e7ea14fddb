//! SEO records attached to catalog entities, forwarded to the SEO service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use domain::{Seo, Validate};

use crate::envelope;
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, RequestContext};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// POST /api/seo/{name}/{pk}
#[tracing::instrument(name = "seo.create.handler", skip_all, fields(name = %name, pk = %pk))]
pub async fn create(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path((name, pk)): Path<(String, String)>,
    JsonBody(seo): JsonBody<Seo>,
) -> Result<Response, ApiError> {
    seo.validate()?;
    state.seo.create(&ctx, &name, &pk, seo).await?;
    Ok(envelope::success(StatusCode::CREATED, "OK"))
}

/// PUT /api/seo/{name}/{pk}
#[tracing::instrument(name = "seo.update.handler", skip_all, fields(name = %name, pk = %pk))]
pub async fn update(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path((name, pk)): Path<(String, String)>,
    JsonBody(seo): JsonBody<Seo>,
) -> Result<Response, ApiError> {
    seo.validate()?;
    state.seo.update(&ctx, &name, &pk, seo).await?;
    Ok(envelope::updated())
}

/// DELETE /api/seo/{name}/{pk}
#[tracing::instrument(name = "seo.delete.handler", skip_all, fields(name = %name, pk = %pk))]
pub async fn delete(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    _user: CurrentUser,
    Path((name, pk)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    state.seo.delete(&ctx, &name, &pk).await?;
    Ok(envelope::deleted())
}
