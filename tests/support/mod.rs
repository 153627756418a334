// Shared primitives for one-time server bootstrapping across integration tests.
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use axum::{Json, Router, http::StatusCode, routing::get};
use error_envelope::{Disclosure, ServerSettings};
use serde_json::json;

// Global base URL used by all tests after the server publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Canned upstream the relay endpoint talks to.
fn stub_upstream() -> Router {
    Router::new()
        .route("/widgets/1", get(|| async { Json(json!({ "id": 1, "name": "sprocket" })) }))
        .route(
            "/widgets/missing",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))) }),
        )
        .route("/widgets/empty", get(|| async { StatusCode::NO_CONTENT }))
        .route("/widgets/plain", get(|| async { "plain text" }))
        .route(
            "/widgets/broken",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "service down") }),
        )
}

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the servers outlive individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let upstream = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral upstream port");
                let upstream_addr = upstream.local_addr().expect("get upstream addr");
                tokio::spawn(async move {
                    axum::serve(upstream, stub_upstream())
                        .await
                        .expect("stub upstream failed");
                });

                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));

                let settings = ServerSettings {
                    upstream_url: format!("http://{upstream_addr}"),
                    upstream_timeout: Duration::from_secs(2),
                    disclosure: Disclosure::Redacted,
                };
                error_envelope::run(listener, settings)
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
