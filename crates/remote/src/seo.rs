//! SEO service adapter.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::CallContext;
use discovery::ServiceResolver;
use domain::Seo;
use tokio::sync::RwLock;

use crate::call::RemoteCaller;
use crate::error::{RemoteError, Result};
use crate::proto::seo::{self, DeleteSeoMsg, SeoMsg};
use crate::proto::Empty;
use crate::transport::Dialer;

/// Trait for maintaining SEO records attached to catalog entities.
#[async_trait]
pub trait SeoPublisher: Send + Sync {
    async fn create(&self, ctx: &CallContext, name: &str, pk: &str, seo: Seo) -> Result<()>;

    async fn update(&self, ctx: &CallContext, name: &str, pk: &str, seo: Seo) -> Result<()>;

    async fn delete(&self, ctx: &CallContext, name: &str, pk: &str) -> Result<()>;
}

fn seo_msg(name: &str, pk: &str, seo: Seo) -> SeoMsg {
    SeoMsg {
        title: seo.title,
        description: seo.description,
        keywords: seo.keywords,
        og_title: seo.og_title,
        og_description: seo.og_description,
        og_image: seo.og_image,
        obj_name: name.to_string(),
        obj_pk: pk.to_string(),
    }
}

/// gRPC client for the SEO service.
pub struct SeoClient<R, D> {
    caller: RemoteCaller<R, D>,
    service: String,
}

impl<R: ServiceResolver, D: Dialer> SeoClient<R, D> {
    pub fn new(caller: RemoteCaller<R, D>, service: impl Into<String>) -> Self {
        Self {
            caller,
            service: service.into(),
        }
    }
}

#[async_trait]
impl<R: ServiceResolver, D: Dialer> SeoPublisher for SeoClient<R, D> {
    #[tracing::instrument(name = "seo.create.adapter", skip(self, ctx, seo))]
    async fn create(&self, ctx: &CallContext, name: &str, pk: &str, seo: Seo) -> Result<()> {
        let _: Empty = self
            .caller
            .unary(ctx, &self.service, seo::CREATE, seo_msg(name, pk, seo))
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "seo.update.adapter", skip(self, ctx, seo))]
    async fn update(&self, ctx: &CallContext, name: &str, pk: &str, seo: Seo) -> Result<()> {
        let _: Empty = self
            .caller
            .unary(ctx, &self.service, seo::UPDATE, seo_msg(name, pk, seo))
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "seo.delete.adapter", skip(self, ctx))]
    async fn delete(&self, ctx: &CallContext, name: &str, pk: &str) -> Result<()> {
        let message = DeleteSeoMsg {
            name: name.to_string(),
            pk: pk.to_string(),
        };
        let _: Empty = self
            .caller
            .unary(ctx, &self.service, seo::DELETE, message)
            .await?;
        Ok(())
    }
}

/// In-memory SEO store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemorySeoPublisher {
    records: Arc<RwLock<HashMap<(String, String), Seo>>>,
}

impl InMemorySeoPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record attached to `(name, pk)`, if any.
    pub async fn record(&self, name: &str, pk: &str) -> Option<Seo> {
        self.records
            .read()
            .await
            .get(&(name.to_string(), pk.to_string()))
            .cloned()
    }
}

fn not_found(name: &str, pk: &str) -> RemoteError {
    RemoteError::Remote(tonic::Status::not_found(format!("seo for {name}/{pk}")))
}

#[async_trait]
impl SeoPublisher for InMemorySeoPublisher {
    async fn create(&self, _ctx: &CallContext, name: &str, pk: &str, seo: Seo) -> Result<()> {
        self.records
            .write()
            .await
            .insert((name.to_string(), pk.to_string()), seo);
        Ok(())
    }

    async fn update(&self, _ctx: &CallContext, name: &str, pk: &str, seo: Seo) -> Result<()> {
        let mut records = self.records.write().await;
        let slot = records
            .get_mut(&(name.to_string(), pk.to_string()))
            .ok_or_else(|| not_found(name, pk))?;
        *slot = seo;
        Ok(())
    }

    async fn delete(&self, _ctx: &CallContext, name: &str, pk: &str) -> Result<()> {
        self.records
            .write()
            .await
            .remove(&(name.to_string(), pk.to_string()))
            .map(|_| ())
            .ok_or_else(|| not_found(name, pk))
    }
}
