//! Catalog server entry point.

use std::sync::Arc;

use api::config::{Config, LogFormat};
use api::{AppState, ServerTimeouts, create_app};
use discovery::DiscoveryClient;
use domain::InMemoryCatalog;
use remote::{BannerClient, GrpcDialer, RemoteCaller, SeoClient, SsoClient};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(common::telemetry::layer("catalog"));
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Registry client, shared by self-registration and name resolution
    let registry = DiscoveryClient::new(
        config.registry_url.as_str(),
        config.service_name.as_str(),
        config.service_address.as_str(),
        config.request_timeout,
    )
    .expect("failed to build registry client");

    // 4. Adapters and controllers
    let caller = RemoteCaller::new(registry.clone(), GrpcDialer);
    let state = AppState::new(
        InMemoryCatalog::new(),
        Arc::new(SsoClient::new(caller.clone(), config.sso_service.as_str())),
        Arc::new(SeoClient::new(caller.clone(), config.seo_service.as_str())),
        Arc::new(BannerClient::new(caller, config.banner_service.as_str())),
    )
    .with_page_size(config.default_page_size)
    .with_request_timeout(config.request_timeout);

    // 5. Build the application
    let app = create_app(state, metrics_handle);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting catalog server");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    let timeouts = ServerTimeouts {
        read: config.read_timeout,
        idle: config.idle_timeout,
    };
    api::serve(listener, app, &registry, timeouts, shutdown_signal()).await;

    tracing::info!("server shut down gracefully");
}
