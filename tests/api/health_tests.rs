//! Health handler tests
//!
//! Readiness needs a live database and is covered by unit tests of its
//! classification logic; these exercise the dependency-free checks.

use axum::{routing::get, Router};
use axum_test::TestServer;
use serde_json::Value;

use catalog_service::presentation::http::handlers::health;

fn server() -> TestServer {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness));
    TestServer::new(router).expect("failed to start test server")
}

#[tokio::test]
async fn test_health_check_returns_ok() {
    let response = server().get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_liveness_check() {
    let response = server().get("/health/live").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "alive");
}
