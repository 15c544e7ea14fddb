//! The call skeleton shared by every adapter:
//! resolve → dial → invoke → close, with trace propagation and metrics.

use std::time::Instant;

use common::{CallContext, telemetry};
use discovery::ServiceResolver;
use opentelemetry::propagation::Injector;
use tonic::metadata::{Ascii, MetadataKey, MetadataMap, MetadataValue};

use crate::error::{RemoteError, Result};
use crate::proto::Method;
use crate::transport::{Dialer, RpcChannel};

/// Routes typed unary calls to a named service through the registry.
#[derive(Debug, Clone)]
pub struct RemoteCaller<R, D> {
    resolver: R,
    dialer: D,
}

impl<R: ServiceResolver, D: Dialer> RemoteCaller<R, D> {
    pub fn new(resolver: R, dialer: D) -> Self {
        Self { resolver, dialer }
    }

    /// Invokes `method` on `service`.
    ///
    /// Opens exactly one transport per call and closes it on every exit
    /// path; when resolution or dialing fails no transport is left open.
    pub async fn unary<Req, Resp>(
        &self,
        ctx: &CallContext,
        service: &str,
        method: Method,
        message: Req,
    ) -> Result<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let started = Instant::now();
        let result = self.invoke(ctx, service, method, message).await;

        let status = match &result {
            Ok(_) => "ok",
            Err(err) => {
                tracing::debug!(
                    service,
                    operation = method.operation,
                    error = %err,
                    "remote call failed"
                );
                err.class()
            }
        };
        metrics::histogram!(
            "remote_call_duration_seconds",
            "operation" => method.operation,
            "status" => status
        )
        .record(started.elapsed().as_secs_f64());

        result
    }

    async fn invoke<Req, Resp>(
        &self,
        ctx: &CallContext,
        service: &str,
        method: Method,
        message: Req,
    ) -> Result<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let address = self
            .resolver
            .resolve(service)
            .await
            .map_err(|_| RemoteError::NotFoundSvc {
                service: service.to_string(),
            })?;

        let mut channel =
            self.dialer
                .dial(&address)
                .await
                .map_err(|e| RemoteError::CreateClient {
                    service: service.to_string(),
                    reason: e.to_string(),
                })?;

        let request = outbound_request(ctx, message);
        let result = channel.unary(method.path, request).await;
        channel.close();

        result.map_err(RemoteError::Remote)
    }
}

/// Writes propagation fields into outgoing gRPC metadata.
struct MetadataInjector<'a>(&'a mut MetadataMap);

impl Injector for MetadataInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        let key = MetadataKey::<Ascii>::from_bytes(key.as_bytes());
        let value = MetadataValue::try_from(value.as_str());
        if let (Ok(key), Ok(value)) = (key, value) {
            self.0.insert(key, value);
        }
    }
}

/// Wraps `message` with the caller's deadline and the `traceparent` of the
/// current (adapter) span.
fn outbound_request<T>(ctx: &CallContext, message: T) -> tonic::Request<T> {
    let mut request = tonic::Request::new(message);
    if let Some(remaining) = ctx.remaining() {
        request.set_timeout(remaining);
    }
    telemetry::inject(
        &tracing::Span::current(),
        &mut MetadataInjector(request.metadata_mut()),
    );
    request
}
