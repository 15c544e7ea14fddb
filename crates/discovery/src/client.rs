//! Reqwest-backed registry client.
//!
//! Every call is a fresh POST to the registry; nothing is cached and
//! nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};
use crate::resolver::ServiceResolver;

#[derive(Serialize)]
struct Registration<'a> {
    name: &'a str,
    address: &'a str,
}

#[derive(Serialize)]
struct FindRequest<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct FindResponse {
    address: String,
}

/// Client for the service registry.
///
/// Holds this process's own identity for register/deregister and resolves
/// sibling services by name. Cheap to clone; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    http: Client,
    registry_url: String,
    name: String,
    address: String,
}

impl DiscoveryClient {
    /// Builds a client with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        registry_url: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            registry_url: registry_url.into().trim_end_matches('/').to_string(),
            name: name.into(),
            address: address.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.registry_url)
    }

    /// Announces this process to the registry. Succeeds only on 201.
    #[tracing::instrument(name = "discovery.register.client", skip(self), fields(name = %self.name))]
    pub async fn register(&self) -> Result<()> {
        self.announce("register", StatusCode::CREATED).await
    }

    /// Withdraws this process from the registry. Succeeds only on 200.
    #[tracing::instrument(name = "discovery.deregister.client", skip(self), fields(name = %self.name))]
    pub async fn deregister(&self) -> Result<()> {
        self.announce("deregister", StatusCode::OK).await
    }

    async fn announce(&self, operation: &'static str, expected: StatusCode) -> Result<()> {
        let response = self
            .http
            .post(self.url(operation))
            .json(&Registration {
                name: &self.name,
                address: &self.address,
            })
            .send()
            .await?;

        let status = response.status();
        if status != expected {
            return Err(DiscoveryError::Rejected {
                operation,
                status: status.as_u16(),
            });
        }
        tracing::info!(address = %self.address, "{operation} accepted by registry");
        Ok(())
    }

    async fn find(&self, name: &str) -> std::result::Result<String, String> {
        let response = self
            .http
            .post(self.url("find"))
            .json(&FindRequest { name })
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(format!("registry answered {status}"));
        }
        response
            .json::<FindResponse>()
            .await
            .map(|found| found.address)
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl ServiceResolver for DiscoveryClient {
    #[tracing::instrument(name = "discovery.resolve.client", skip(self))]
    async fn resolve(&self, name: &str) -> Result<String> {
        self.find(name).await.map_err(|reason| {
            tracing::debug!(service = name, %reason, "service lookup failed");
            DiscoveryError::NotFoundSvc(name.to_string())
        })
    }
}
