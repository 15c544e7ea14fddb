//! Per-request span, call context, deadline, and HTTP metrics.

use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use common::{CallContext, telemetry};
use opentelemetry::propagation::Extractor;
use tracing::Instrument;

use crate::error::ApiError;

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|name| name.as_str()).collect()
    }
}

/// Opens the request span and stores a [`CallContext`] in the request
/// extensions.
///
/// The span continues an incoming `traceparent` header when it is valid and
/// starts a new trace otherwise. Downstream handling must finish within
/// `timeout`; past it the handler future is dropped and the client gets 408.
pub async fn trace_request(
    State(timeout): State<Duration>,
    mut req: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let span = tracing::info_span!(
        "http.request",
        %method,
        route = %route,
        trace_id = tracing::field::Empty,
        status = tracing::field::Empty,
    );
    telemetry::continue_trace(&span, &HeaderExtractor(req.headers()));
    if let Some(trace_id) = telemetry::trace_id(&span) {
        span.record("trace_id", trace_id);
    }
    req.extensions_mut()
        .insert(CallContext::new().with_timeout(timeout));

    let response = match tokio::time::timeout(timeout, next.run(req))
        .instrument(span.clone())
        .await
    {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(parent: &span, ?timeout, "request timed out");
            ApiError::Timeout.into_response()
        }
    };

    let status = response.status().as_u16();
    span.record("status", status);
    let operation = format!("{method} {route}");
    let status = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "operation" => operation.clone(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "http_request_duration_seconds",
        "operation" => operation,
        "status" => status
    )
    .record(started.elapsed().as_secs_f64());

    response
}
