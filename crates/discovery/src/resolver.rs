//! Name resolution seam used by outbound adapters.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{DiscoveryError, Result};

/// Resolves a logical service name to a dialable address.
#[async_trait]
pub trait ServiceResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<String>;
}

#[async_trait]
impl<T: ServiceResolver + ?Sized> ServiceResolver for Arc<T> {
    async fn resolve(&self, name: &str) -> Result<String> {
        (**self).resolve(name).await
    }
}

/// Resolver backed by a fixed name → address map.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    services: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new(services: HashMap<String, String>) -> Self {
        Self { services }
    }

    /// Build from a slice of (name, address) pairs.
    pub fn from_slice(pairs: &[(&str, &str)]) -> Self {
        Self {
            services: pairs
                .iter()
                .map(|(name, address)| ((*name).to_string(), (*address).to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl ServiceResolver for StaticResolver {
    async fn resolve(&self, name: &str) -> Result<String> {
        self.services
            .get(name)
            .cloned()
            .ok_or_else(|| DiscoveryError::NotFoundSvc(name.to_string()))
    }
}
