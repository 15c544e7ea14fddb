//! Per-call transports.
//!
//! A [`Dialer`] opens one [`RpcChannel`] per outbound call. The channel
//! carries exactly one unary request and is then closed; channels are
//! never shared between calls.

use async_trait::async_trait;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

/// Error raised while opening a transport.
pub type DialError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait Dialer: Send + Sync {
    type Channel: RpcChannel;

    /// Opens a new transport to `address`.
    async fn dial(&self, address: &str) -> Result<Self::Channel, DialError>;
}

#[async_trait]
pub trait RpcChannel: Send {
    /// Invokes a unary method.
    async fn unary<Req, Resp>(
        &mut self,
        path: &'static str,
        request: tonic::Request<Req>,
    ) -> Result<Resp, tonic::Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static;

    /// Releases the transport.
    fn close(self);
}

/// Dials plaintext HTTP/2 channels; TLS is terminated by the mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcDialer;

#[async_trait]
impl Dialer for GrpcDialer {
    type Channel = GrpcChannel;

    async fn dial(&self, address: &str) -> Result<GrpcChannel, DialError> {
        let uri = if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };
        let channel = Endpoint::from_shared(uri)?.connect().await?;
        Ok(GrpcChannel {
            inner: tonic::client::Grpc::new(channel),
        })
    }
}

/// A connected tonic channel used for a single call.
pub struct GrpcChannel {
    inner: tonic::client::Grpc<Channel>,
}

#[async_trait]
impl RpcChannel for GrpcChannel {
    async fn unary<Req, Resp>(
        &mut self,
        path: &'static str,
        request: tonic::Request<Req>,
    ) -> Result<Resp, tonic::Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unavailable(format!("service was not ready: {e}")))?;
        let codec = tonic::codec::ProstCodec::<Req, Resp>::default();
        self.inner
            .unary(request, PathAndQuery::from_static(path), codec)
            .await
            .map(tonic::Response::into_inner)
    }

    fn close(self) {
        drop(self.inner);
    }
}
