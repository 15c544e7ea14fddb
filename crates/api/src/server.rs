//! HTTP/1.1 connection handling with header-read and idle limits.

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::response::Response;
use discovery::DiscoveryClient;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tower::ServiceExt;

/// Connection-level limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerTimeouts {
    /// Time a client has to deliver a complete request head.
    pub read: Duration,
    /// A keep-alive connection with no request in flight is closed after
    /// this long.
    pub idle: Duration,
}

impl Default for ServerTimeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(15),
            idle: Duration::from_secs(60),
        }
    }
}

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// The service announces itself to the registry before accepting
/// connections and withdraws after the server has drained. Both registry
/// calls are best-effort: failures are logged and never stop the server.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    registry: &DiscoveryClient,
    timeouts: ServerTimeouts,
    shutdown: F,
) where
    F: Future<Output = ()> + Send + 'static,
{
    match registry.register().await {
        Ok(()) => tracing::info!(
            name = registry.name(),
            address = registry.address(),
            "registered with service registry"
        ),
        Err(err) => tracing::warn!(error = %err, "service registration failed"),
    }

    run(listener, app, timeouts, shutdown).await;

    match registry.deregister().await {
        Ok(()) => tracing::info!(name = registry.name(), "deregistered from service registry"),
        Err(err) => tracing::warn!(error = %err, "service deregistration failed"),
    }
}

/// Accepts connections until `shutdown` resolves, then lets open
/// connections finish their in-flight requests.
pub async fn run<F>(listener: TcpListener, app: Router, timeouts: ServerTimeouts, shutdown: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop, stopping) = watch::channel(false);
    let mut connections = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tracing::trace!(%peer, "accepted connection");
                    connections.spawn(connection(stream, app.clone(), timeouts, stopping.clone()));
                }
                Err(err) => tracing::warn!(error = %err, "failed to accept connection"),
            },
        }
    }

    drop(listener);
    let _ = stop.send(true);
    while connections.join_next().await.is_some() {}
}

/// Decrements the in-flight count when the request future ends, including
/// when it is dropped.
struct InFlight(Arc<watch::Sender<usize>>);

impl InFlight {
    fn start(count: Arc<watch::Sender<usize>>) -> Self {
        count.send_modify(|n| *n += 1);
        Self(count)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n -= 1);
    }
}

async fn connection(
    stream: TcpStream,
    app: Router,
    timeouts: ServerTimeouts,
    mut stopping: watch::Receiver<bool>,
) {
    let (in_flight, mut activity) = watch::channel(0usize);
    let in_flight = Arc::new(in_flight);
    let service = service_fn(move |req: axum::http::Request<Incoming>| {
        let guard = InFlight::start(in_flight.clone());
        let app = app.clone();
        async move {
            let response: Result<Response, Infallible> = app.oneshot(req).await;
            drop(guard);
            response
        }
    });

    let conn = http1::Builder::new()
        .timer(TokioTimer::new())
        .header_read_timeout(timeouts.read)
        .serve_connection(TokioIo::new(stream), service);
    tokio::pin!(conn);

    let mut closing = false;
    loop {
        let idle = *activity.borrow_and_update() == 0;
        tokio::select! {
            result = conn.as_mut() => {
                if let Err(err) = result {
                    tracing::debug!(error = %err, "connection closed with error");
                }
                return;
            }
            Ok(()) = activity.changed() => {}
            () = tokio::time::sleep(timeouts.idle), if idle && !closing => {
                tracing::debug!(idle = ?timeouts.idle, "closing idle connection");
                conn.as_mut().graceful_shutdown();
                closing = true;
            }
            Ok(()) = stopping.changed(), if !closing => {
                conn.as_mut().graceful_shutdown();
                closing = true;
            }
        }
    }
}
