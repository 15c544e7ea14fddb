//! Banner service adapter.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::CallContext;
use discovery::ServiceResolver;
use domain::{Banner, BannerSlide};
use prost_types::Timestamp;
use tokio::sync::RwLock;

use crate::call::RemoteCaller;
use crate::error::{RemoteError, Result};
use crate::proto::banner::{self, BannerMsg, DeleteBannerMsg, SlideMsg, UpdateBannerMsg};
use crate::proto::Empty;
use crate::transport::Dialer;

/// Trait for maintaining banners attached to catalog entities.
#[async_trait]
pub trait BannerPublisher: Send + Sync {
    async fn create(&self, ctx: &CallContext, name: &str, pk: &str, banner: Banner) -> Result<()>;

    async fn update(&self, ctx: &CallContext, name: &str, pk: &str, banner: Banner) -> Result<()>;

    async fn delete(&self, ctx: &CallContext, name: &str, pk: &str) -> Result<()>;
}

fn timestamp(at: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    }
}

fn slide_msg(slide: BannerSlide) -> SlideMsg {
    SlideMsg {
        id: slide.id,
        title: slide.title,
        description: slide.description,
        src: slide.src,
        alt: slide.alt,
        button_text: slide.button_text,
        button_href: slide.button_href,
        banner_id: slide.banner_id,
        created_at: Some(timestamp(slide.created_at)),
        updated_at: Some(timestamp(slide.updated_at)),
    }
}

fn banner_msg(name: &str, pk: &str, banner: Banner) -> BannerMsg {
    BannerMsg {
        obj_name: name.to_string(),
        obj_pk: pk.to_string(),
        slides: banner.slides.into_iter().map(slide_msg).collect(),
    }
}

/// gRPC client for the banner service.
pub struct BannerClient<R, D> {
    caller: RemoteCaller<R, D>,
    service: String,
}

impl<R: ServiceResolver, D: Dialer> BannerClient<R, D> {
    pub fn new(caller: RemoteCaller<R, D>, service: impl Into<String>) -> Self {
        Self {
            caller,
            service: service.into(),
        }
    }
}

#[async_trait]
impl<R: ServiceResolver, D: Dialer> BannerPublisher for BannerClient<R, D> {
    #[tracing::instrument(name = "banner.create.adapter", skip(self, ctx, banner))]
    async fn create(&self, ctx: &CallContext, name: &str, pk: &str, banner: Banner) -> Result<()> {
        let _: Empty = self
            .caller
            .unary(ctx, &self.service, banner::CREATE, banner_msg(name, pk, banner))
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "banner.update.adapter", skip(self, ctx, banner))]
    async fn update(&self, ctx: &CallContext, name: &str, pk: &str, banner: Banner) -> Result<()> {
        let message = UpdateBannerMsg {
            name: name.to_string(),
            pk: pk.to_string(),
            banner: Some(banner_msg(name, pk, banner)),
        };
        let _: Empty = self
            .caller
            .unary(ctx, &self.service, banner::UPDATE, message)
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "banner.delete.adapter", skip(self, ctx))]
    async fn delete(&self, ctx: &CallContext, name: &str, pk: &str) -> Result<()> {
        let message = DeleteBannerMsg {
            name: name.to_string(),
            pk: pk.to_string(),
        };
        let _: Empty = self
            .caller
            .unary(ctx, &self.service, banner::DELETE, message)
            .await?;
        Ok(())
    }
}

/// In-memory banner store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBannerPublisher {
    banners: Arc<RwLock<HashMap<(String, String), Banner>>>,
}

impl InMemoryBannerPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the banner attached to `(name, pk)`, if any.
    pub async fn banner(&self, name: &str, pk: &str) -> Option<Banner> {
        self.banners
            .read()
            .await
            .get(&(name.to_string(), pk.to_string()))
            .cloned()
    }
}

fn not_found(name: &str, pk: &str) -> RemoteError {
    RemoteError::Remote(tonic::Status::not_found(format!("banner for {name}/{pk}")))
}

#[async_trait]
impl BannerPublisher for InMemoryBannerPublisher {
    async fn create(&self, _ctx: &CallContext, name: &str, pk: &str, banner: Banner) -> Result<()> {
        self.banners
            .write()
            .await
            .insert((name.to_string(), pk.to_string()), banner);
        Ok(())
    }

    async fn update(&self, _ctx: &CallContext, name: &str, pk: &str, banner: Banner) -> Result<()> {
        let mut banners = self.banners.write().await;
        let slot = banners
            .get_mut(&(name.to_string(), pk.to_string()))
            .ok_or_else(|| not_found(name, pk))?;
        *slot = banner;
        Ok(())
    }

    async fn delete(&self, _ctx: &CallContext, name: &str, pk: &str) -> Result<()> {
        self.banners
            .write()
            .await
            .remove(&(name.to_string(), pk.to_string()))
            .map(|_| ())
            .ok_or_else(|| not_found(name, pk))
    }
}
