//! Health and documentation endpoint tests.

mod helpers;

use axum::http::StatusCode;
use helpers::{setup_failing_app, setup_test_app, stylize_settings, unconfigured};
use serde_json::Value;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app(unconfigured()).await;

    let response = app.client().get("/live").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "alive");
}

#[tokio::test]
async fn test_health_reports_components() {
    let app = setup_test_app(unconfigured()).await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "healthy");
    assert_eq!(body["storage"], "healthy");
    assert_eq!(body["stylization"], "not_configured");
}

#[tokio::test]
async fn test_health_reports_configured_stylization() {
    let app = setup_test_app(stylize_settings("http://127.0.0.1:1", true)).await;

    let body = app.client().get("/health").await.json::<Value>();

    assert_eq!(body["stylization"], "configured");
}

#[tokio::test]
async fn test_health_unavailable_when_database_fails() {
    let (server, _temp_dir) = setup_failing_app().await;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "unhealthy");
    assert!(body["database"].as_str().unwrap().starts_with("unhealthy"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app(unconfigured()).await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<Value>()["paths"]["/portfolio"].is_object());
}
