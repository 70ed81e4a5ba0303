//! Integration tests for health and metrics endpoints.

mod common;

use axum::http::StatusCode;
use common::{get_request, send, setup};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check_reports_schema() {
    let (_pool, app) = setup().await;

    let (status, body) = send(&app, get_request("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["connected"], true);
    assert!(body["database"].get("missing_tables").is_none());
}

#[tokio::test]
async fn test_liveness_and_readiness() {
    let (_pool, app) = setup().await;

    let (status, body) = send(&app, get_request("/api/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");

    let (status, body) = send(&app, get_request("/api/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (_pool, app) = setup().await;

    let mut request = get_request("/api/health/live");
    request
        .headers_mut()
        .insert("x-request-id", "it-req-42".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "it-req-42"
    );
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let (_pool, app) = setup().await;

    let response = app
        .oneshot(get_request("/api/v1/unknown"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
