//! Bearer-token authentication delegated to the identity service.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use common::{CallContext, UserId};
use remote::IdentityProvider;

use crate::error::ApiError;

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("authorization header is missing".to_string()))?;
    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("invalid token format".to_string()))
}

/// Resolves the bearer token to a caller id and stores it in the request's
/// [`CallContext`]. Rejections never reach the handler.
pub async fn authenticate(
    State(identity): State<Arc<dyn IdentityProvider>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?.to_owned();
    let ctx = req
        .extensions()
        .get::<CallContext>()
        .cloned()
        .unwrap_or_else(CallContext::background);

    let caller = identity
        .resolve_token(&ctx, &token)
        .await
        .map_err(|err| ApiError::Unauthorized(err.to_string()))?;

    req.extensions_mut().insert(ctx.with_caller(caller));
    Ok(next.run(req).await)
}

/// The authenticated caller. Rejects with 401 unless [`authenticate`] stored
/// a caller id that parses as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallContext>()
            .and_then(CallContext::user_id)
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("invalid user identity".to_string()))
    }
}
