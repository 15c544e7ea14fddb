//! Single-sign-on adapter: token validation and token → user id.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::CallContext;
use discovery::ServiceResolver;
use tokio::sync::RwLock;

use crate::call::RemoteCaller;
use crate::error::{RemoteError, Result};
use crate::proto::sso::{self, BoolMsg, StringMsg, UserMsg};
use crate::transport::Dialer;

/// Trait for resolving bearer tokens to callers.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Asks the identity service whether `token` is currently valid.
    async fn validate_token(&self, ctx: &CallContext, token: &str) -> Result<bool>;

    /// Returns the id of the user `token` was issued to.
    async fn resolve_token(&self, ctx: &CallContext, token: &str) -> Result<String>;
}

/// gRPC client for the SSO service.
pub struct SsoClient<R, D> {
    caller: RemoteCaller<R, D>,
    service: String,
}

impl<R: ServiceResolver, D: Dialer> SsoClient<R, D> {
    pub fn new(caller: RemoteCaller<R, D>, service: impl Into<String>) -> Self {
        Self {
            caller,
            service: service.into(),
        }
    }
}

#[async_trait]
impl<R: ServiceResolver, D: Dialer> IdentityProvider for SsoClient<R, D> {
    #[tracing::instrument(name = "sso.validate_token.adapter", skip_all)]
    async fn validate_token(&self, ctx: &CallContext, token: &str) -> Result<bool> {
        let response: BoolMsg = self
            .caller
            .unary(
                ctx,
                &self.service,
                sso::VALIDATE_TOKEN,
                StringMsg {
                    string: token.to_string(),
                },
            )
            .await?;
        Ok(response.valid)
    }

    #[tracing::instrument(name = "sso.get_user_by_token.adapter", skip_all)]
    async fn resolve_token(&self, ctx: &CallContext, token: &str) -> Result<String> {
        let response: UserMsg = self
            .caller
            .unary(
                ctx,
                &self.service,
                sso::GET_USER_BY_TOKEN,
                StringMsg {
                    string: token.to_string(),
                },
            )
            .await?;
        Ok(response.id)
    }
}

/// In-memory identity provider for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentity {
    tokens: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryIdentity {
    /// Creates a provider that knows no tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues `token` for `user_id`.
    pub async fn issue(&self, token: impl Into<String>, user_id: impl Into<String>) {
        self.tokens.write().await.insert(token.into(), user_id.into());
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentity {
    async fn validate_token(&self, _ctx: &CallContext, token: &str) -> Result<bool> {
        Ok(self.tokens.read().await.contains_key(token))
    }

    async fn resolve_token(&self, _ctx: &CallContext, token: &str) -> Result<String> {
        self.tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or_else(|| RemoteError::Remote(tonic::Status::unauthenticated("invalid token")))
    }
}
