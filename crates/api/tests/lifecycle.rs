//! Startup and shutdown against a fake service registry, and connection
//! lifetimes on a live listener.

mod support;

use std::sync::{Arc, Mutex};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use api::ServerTimeouts;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use discovery::DiscoveryClient;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

type Calls = Arc<Mutex<Vec<(String, Value)>>>;

async fn spawn_registry(register_status: StatusCode) -> (String, Calls) {
    let calls = Calls::default();
    let record = |path: &'static str, status: StatusCode| {
        move |State(calls): State<Calls>, Json(body): Json<Value>| async move {
            calls.lock().unwrap().push((path.to_string(), body));
            status
        }
    };
    let router = Router::new()
        .route("/register", post(record("register", register_status)))
        .route("/deregister", post(record("deregister", StatusCode::OK)))
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), calls)
}

async fn run_until_shutdown(registry_url: &str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    let client =
        DiscoveryClient::new(registry_url, "catalog", address.as_str(), Duration::from_secs(2))
            .unwrap();
    let app = support::setup().await.app;

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        api::serve(listener, app, &client, ServerTimeouts::default(), async {
            let _ = rx.await;
        })
        .await
    });

    tx.send(()).unwrap();
    server.await.unwrap();
    address
}

#[tokio::test]
async fn test_register_and_deregister_round_trip() {
    let (url, calls) = spawn_registry(StatusCode::CREATED).await;

    let address = run_until_shutdown(&url).await;

    let identity = json!({ "name": "catalog", "address": address });
    assert_eq!(
        calls.lock().unwrap().clone(),
        vec![
            ("register".to_string(), identity.clone()),
            ("deregister".to_string(), identity),
        ]
    );
}

#[tokio::test]
async fn test_rejected_registration_is_not_fatal() {
    let (url, calls) = spawn_registry(StatusCode::INTERNAL_SERVER_ERROR).await;

    run_until_shutdown(&url).await;

    let paths: Vec<String> = calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(paths, vec!["register", "deregister"]);
}

#[tokio::test]
async fn test_unreachable_registry_is_not_fatal() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    run_until_shutdown(&dead).await;
}

const HEALTH_CHECK: &[u8] = b"GET /api/health-check HTTP/1.1\r\nhost: catalog\r\n\r\n";

async fn spawn_server(timeouts: ServerTimeouts) -> (SocketAddr, oneshot::Sender<()>, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = support::setup().await.app;
    let (tx, rx) = oneshot::channel::<()>();
    let server = tokio::spawn(api::server::run(listener, app, timeouts, async {
        let _ = rx.await;
    }));
    (addr, tx, server)
}

/// Reads until one complete health-check response has arrived.
async fn read_health_response(stream: &mut TcpStream) -> String {
    let mut received = Vec::new();
    let mut chunk = [0u8; 1024];
    while !String::from_utf8_lossy(&received).contains(r#"{"data":"OK"}"#) {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the response completed");
        received.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8(received).unwrap()
}

#[tokio::test]
async fn test_idle_keep_alive_connection_is_closed() {
    let idle = Duration::from_millis(200);
    let (addr, _tx, _server) = spawn_server(ServerTimeouts {
        read: Duration::from_secs(5),
        idle,
    })
    .await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(HEALTH_CHECK).await.unwrap();
    let sent = Instant::now();
    let response = read_health_response(&mut stream).await;
    assert!(response.starts_with("HTTP/1.1 200"));

    let mut rest = Vec::new();
    let closed = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut rest)).await;
    assert!(closed.is_ok(), "idle connection was left open");
    assert!(sent.elapsed() >= idle);
}

#[tokio::test]
async fn test_keep_alive_connection_is_reused_within_idle_limit() {
    let (addr, _tx, _server) = spawn_server(ServerTimeouts {
        read: Duration::from_secs(5),
        idle: Duration::from_secs(10),
    })
    .await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(HEALTH_CHECK).await.unwrap();
    read_health_response(&mut stream).await;

    let mut byte = [0u8; 1];
    let waited = tokio::time::timeout(Duration::from_millis(300), stream.read(&mut byte)).await;
    assert!(waited.is_err(), "connection closed before the idle limit");

    stream.write_all(HEALTH_CHECK).await.unwrap();
    let response = read_health_response(&mut stream).await;
    assert!(response.starts_with("HTTP/1.1 200"));
}

#[tokio::test]
async fn test_shutdown_closes_open_connections() {
    let (addr, tx, server) = spawn_server(ServerTimeouts {
        read: Duration::from_secs(5),
        idle: Duration::from_secs(10),
    })
    .await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(HEALTH_CHECK).await.unwrap();
    read_health_response(&mut stream).await;

    tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not drain")
        .unwrap();

    let mut rest = Vec::new();
    let n = stream.read_to_end(&mut rest).await.unwrap_or(0);
    assert_eq!(n, 0);
}
