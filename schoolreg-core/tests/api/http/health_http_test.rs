//! Health, readiness and metrics endpoint tests

use super::{build_test_router, get_json, TestAppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

async fn get_text(app: &axum::Router, path: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn test_health() {
    let app = build_test_router(TestAppState::new("http://127.0.0.1:1"));

    let (status, body): (_, Option<Value>) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["status"], "healthy");
}

#[tokio::test]
async fn test_ready_when_store_reachable() {
    let app = build_test_router(TestAppState::new("http://127.0.0.1:1"));

    let (status, body) = get_text(&app, "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ready");
}

#[tokio::test]
async fn test_not_ready_when_store_unreachable() {
    let state = TestAppState::new("http://127.0.0.1:1");
    state.school_repo.set_failing(true);
    let app = build_test_router(state);

    let (status, body) = get_text(&app, "/ready").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "not_ready");
}

#[tokio::test]
async fn test_metrics_disabled_returns_not_found() {
    let app = build_test_router(TestAppState::new("http://127.0.0.1:1"));

    let (status, _) = get_text(&app, "/metrics").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = build_test_router(TestAppState::new("http://127.0.0.1:1"));
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}
