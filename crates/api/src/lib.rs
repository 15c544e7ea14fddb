//! HTTP API for the product catalog.
//!
//! Serves items, categories, favorites, promotions, and orders under `/api`,
//! forwards SEO records and banners to their services, and delegates bearer
//! token checks to the identity service. Every response is a JSON envelope;
//! requests are traced and counted in Prometheus metrics.

pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod query;
pub mod routes;
pub mod server;
pub mod state;

use axum::Router;
use axum::routing::{get, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{method_not_allowed, not_found};
use crate::routes::{banners, categories, favorites, health, items, orders, promotions, seo};

pub use crate::config::Config;
pub use crate::error::ApiError;
pub use crate::server::{ServerTimeouts, serve};
pub use crate::state::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// Mutating routes sit behind the bearer-auth middleware; methods a route
/// does not serve get 405 and unknown paths 404, both as envelopes. Panic
/// recovery wraps everything, so a panicking handler still gets a 500
/// envelope even though the trace middleware never sees its response.
pub fn create_app(state: AppState, metrics_handle: PrometheusHandle) -> Router {
    let auth =
        axum::middleware::from_fn_with_state(state.identity.clone(), middleware::authenticate);
    let request_timeout = state.request_timeout;

    let api = Router::new()
        .route(
            "/health-check",
            get(health::check).fallback(method_not_allowed),
        )
        // items
        .route(
            "/item",
            get(items::list)
                .merge(post(items::create).route_layer(auth.clone()))
                .fallback(method_not_allowed),
        )
        .route(
            "/item/search",
            get(items::search).fallback(method_not_allowed),
        )
        .route(
            "/item/attr/search",
            get(items::search_by_attribute).fallback(method_not_allowed),
        )
        .route(
            "/item/{uid}",
            get(items::get)
                .merge(
                    put(items::update)
                        .delete(items::delete)
                        .route_layer(auth.clone()),
                )
                .fallback(method_not_allowed),
        )
        .route(
            "/item/{uid}/related",
            get(items::related).fallback(method_not_allowed),
        )
        .route("/hits", get(items::hits).fallback(method_not_allowed))
        .route("/recs", get(items::recs).fallback(method_not_allowed))
        // categories
        .route(
            "/category",
            get(categories::list)
                .merge(post(categories::create).route_layer(auth.clone()))
                .fallback(method_not_allowed),
        )
        .route(
            "/category/search",
            get(categories::search).fallback(method_not_allowed),
        )
        .route(
            "/category/filters/search",
            get(categories::search_filters).fallback(method_not_allowed),
        )
        .route(
            "/category/filters/{slug}",
            get(categories::filters).fallback(method_not_allowed),
        )
        .route(
            "/category/{slug}",
            get(categories::get)
                .merge(
                    put(categories::update)
                        .delete(categories::delete)
                        .route_layer(auth.clone()),
                )
                .fallback(method_not_allowed),
        )
        .route(
            "/category/{slug}/items",
            get(categories::items).fallback(method_not_allowed),
        )
        // favorites
        .route(
            "/favorite",
            get(favorites::list)
                .post(favorites::add)
                .delete(favorites::remove)
                .route_layer(auth.clone())
                .fallback(method_not_allowed),
        )
        // promotions
        .route(
            "/promotions",
            get(promotions::list)
                .merge(post(promotions::create).route_layer(auth.clone()))
                .fallback(method_not_allowed),
        )
        .route(
            "/promotions/search",
            get(promotions::search).fallback(method_not_allowed),
        )
        .route(
            "/promotions/items/{slug}",
            get(promotions::items).fallback(method_not_allowed),
        )
        .route(
            "/promotions/{slug}",
            get(promotions::get)
                .merge(
                    put(promotions::update)
                        .delete(promotions::delete)
                        .route_layer(auth.clone()),
                )
                .fallback(method_not_allowed),
        )
        // orders
        .route(
            "/order",
            post(orders::create)
                .merge(get(orders::list).route_layer(auth.clone()))
                .fallback(method_not_allowed),
        )
        .route(
            "/order/{id}",
            get(orders::get)
                .put(orders::update)
                .delete(orders::delete)
                .route_layer(auth.clone())
                .fallback(method_not_allowed),
        )
        // attached content
        .route(
            "/seo/{name}/{pk}",
            post(seo::create)
                .put(seo::update)
                .delete(seo::delete)
                .route_layer(auth.clone())
                .fallback(method_not_allowed),
        )
        .route(
            "/banner/{name}/{pk}",
            post(banners::create)
                .put(banners::update)
                .delete(banners::delete)
                .route_layer(auth)
                .fallback(method_not_allowed),
        );

    let metrics_router = Router::new()
        .route(
            "/metrics",
            get(routes::metrics::render).fallback(method_not_allowed),
        )
        .with_state(metrics_handle);

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::middleware::from_fn_with_state(
            request_timeout,
            middleware::trace_request,
        ))
        .layer(CatchPanicLayer::custom(middleware::recover_panic))
}
