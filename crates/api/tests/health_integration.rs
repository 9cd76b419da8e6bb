//! Integration tests for health probes and request plumbing.

mod common;

use axum::http::StatusCode;
use common::{create_test_app, get_request, parse_response_body, As};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check_reports_memory_store() {
    let app = create_test_app().await;

    let response = app
        .oneshot(get_request("/api/health", As::Anonymous))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "memory");
    assert_eq!(body["storage"]["connected"], true);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_liveness_and_readiness() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/health/live", As::Anonymous))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "alive");

    let response = app
        .oneshot(get_request("/api/health/ready", As::Anonymous))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_generated_or_propagated() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/health/live", As::Anonymous))
        .await
        .unwrap();
    let generated = response.headers().get("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let mut request = get_request("/api/health/live", As::Anonymous);
    request
        .headers_mut()
        .insert("X-Request-ID", "req-42".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-42");
}

#[tokio::test]
async fn test_metrics_unavailable_without_recorder() {
    let app = create_test_app().await;

    let response = app
        .oneshot(get_request("/metrics", As::Anonymous))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .oneshot(get_request("/api/v1/classrooms", As::admin()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
