mod common;

use axum::http::StatusCode;
use common::{get, send, spawn_app, text_body};

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app();

    let response = send(&app, get("/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(text_body(response).await, "OK");
}

#[tokio::test]
async fn metrics_endpoint_reports_requests() {
    let app = spawn_app();
    send(&app, get("/health", None)).await;

    let response = send(&app, get("/metrics", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(text_body(response).await.contains("http_requests_total"));
}
