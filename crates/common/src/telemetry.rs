//! OpenTelemetry span contexts for `tracing` spans and W3C trace-context
//! propagation.
//!
//! Install [`layer`] in the subscriber so every span carries trace and span
//! ids. Inbound carriers are read with [`continue_trace`]. Outbound carriers
//! are written with [`inject`].

use std::collections::HashMap;

use opentelemetry::propagation::{Extractor, Injector, TextMapPropagator};
use opentelemetry::trace::{TraceContextExt, TracerProvider as _};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{Tracer, TracerProvider};
use tracing_opentelemetry::{OpenTelemetryLayer, OpenTelemetrySpanExt};
use tracing_subscriber::registry::LookupSpan;

/// W3C `traceparent` header / metadata key.
pub const TRACEPARENT: &str = "traceparent";

/// Subscriber layer that assigns OpenTelemetry ids to every span.
///
/// No exporter is attached: ids exist for propagation and log correlation.
pub fn layer<S>(service: &'static str) -> OpenTelemetryLayer<S, Tracer>
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
{
    let provider = TracerProvider::builder().build();
    tracing_opentelemetry::layer().with_tracer(provider.tracer(service))
}

/// Parents `span` on the trace described by `carrier`.
///
/// A missing or malformed `traceparent` leaves `span` as the root of a new
/// trace. Must be called before `span` is first entered.
pub fn continue_trace(span: &tracing::Span, carrier: &dyn Extractor) {
    span.set_parent(TraceContextPropagator::new().extract(carrier));
}

/// Writes the context of `span` into `carrier`. Spans without an
/// OpenTelemetry context write nothing.
pub fn inject(span: &tracing::Span, carrier: &mut dyn Injector) {
    TraceContextPropagator::new().inject_context(&span.context(), carrier);
}

/// The `traceparent` value [`inject`] would write for `span`.
pub fn traceparent(span: &tracing::Span) -> Option<String> {
    let mut carrier = HashMap::new();
    inject(span, &mut carrier);
    carrier.remove(TRACEPARENT)
}

/// Hex trace id of `span`, when it has a valid context.
pub fn trace_id(span: &tracing::Span) -> Option<String> {
    let cx = span.context();
    let otel_span = cx.span();
    let span_context = otel_span.span_context();
    span_context
        .is_valid()
        .then(|| span_context.trace_id().to_string())
}
