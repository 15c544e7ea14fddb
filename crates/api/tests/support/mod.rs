//! Shared fixtures for the API integration suites.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain::{Category, CategoryFilter, InMemoryCatalog, Item, Promotion};
use metrics_exporter_prometheus::PrometheusHandle;
use remote::{InMemoryBannerPublisher, InMemoryIdentity, InMemorySeoPublisher};
use serde_json::Value;
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use uuid::Uuid;

pub const USER: &str = "6f1c9a52-6d0e-4c59-9a4e-0f4e7c1d2b3a";
pub const OTHER_USER: &str = "0b9e4d8a-3c71-4f0e-8d52-7a6b1c2d3e4f";

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

/// Installs a subscriber with OpenTelemetry span contexts on this thread.
pub fn trace_guard() -> DefaultGuard {
    tracing::subscriber::set_default(
        tracing_subscriber::registry().with(common::telemetry::layer("catalog-test")),
    )
}

/// The app plus handles on every in-memory collaborator behind it.
pub struct Harness {
    pub app: Router,
    pub state: api::AppState,
    pub catalog: InMemoryCatalog,
    pub identity: InMemoryIdentity,
    pub seo: InMemorySeoPublisher,
    pub banners: InMemoryBannerPublisher,
}

impl Harness {
    /// Rebuilds the router after `state` was modified.
    pub fn rebuild(mut self, f: impl FnOnce(&mut api::AppState)) -> Self {
        f(&mut self.state);
        self.app = api::create_app(self.state.clone(), get_metrics_handle());
        self
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(request("GET", uri, None, None)).await
    }

    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send(request(method, uri, token, body)).await
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Tokens: `valid` → [`USER`], `other` → [`OTHER_USER`], `anonymous` → empty
/// id, `opaque` → a non-UUID id.
pub async fn setup() -> Harness {
    let catalog = InMemoryCatalog::with_journal();
    let identity = InMemoryIdentity::new();
    identity.issue("valid", USER).await;
    identity.issue("other", OTHER_USER).await;
    identity.issue("anonymous", "").await;
    identity.issue("opaque", "user-id").await;
    let seo = InMemorySeoPublisher::new();
    let banners = InMemoryBannerPublisher::new();

    let state = api::AppState::new(
        catalog.clone(),
        Arc::new(identity.clone()),
        Arc::new(seo.clone()),
        Arc::new(banners.clone()),
    );
    let app = api::create_app(state.clone(), get_metrics_handle());

    Harness {
        app,
        state,
        catalog,
        identity,
        seo,
        banners,
    }
}

pub fn item(title: &str, price: i64, category: &str) -> Item {
    Item {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: String::new(),
        price,
        src: String::new(),
        attributes: Default::default(),
        category: category.to_string(),
        labels: Vec::new(),
    }
}

pub fn category(slug: &str, title: &str) -> Category {
    Category {
        slug: slug.to_string(),
        title: title.to_string(),
        filters: vec![CategoryFilter {
            name: "color".to_string(),
            title: "Color".to_string(),
            values: vec!["red".to_string(), "black".to_string()],
        }],
    }
}

pub fn promotion(slug: &str, items: Vec<Uuid>) -> Promotion {
    Promotion {
        slug: slug.to_string(),
        title: "Spring sale".to_string(),
        description: String::new(),
        src: String::new(),
        items,
    }
}
