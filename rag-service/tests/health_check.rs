mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{get_json, router_with, TestApp};
use rag_service::services::providers::mock::MockRetrievalProvider;
use rag_service::services::ProviderError;
use std::sync::Arc;
use tower::util::ServiceExt;

#[tokio::test]
async fn root_returns_welcome_message() {
    let provider = Arc::new(MockRetrievalProvider::answering("unused"));

    let (status, body) = get_json(router_with(provider.clone()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({ "message": "Welcome to your RAG chatbot API!" })
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn root_does_not_depend_on_provider_health() {
    let provider = Arc::new(MockRetrievalProvider::failing(ProviderError::AccessDenied(
        "expired credentials".into(),
    )));

    let (status, body) = get_json(router_with(provider), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to your RAG chatbot API!");
}

#[tokio::test]
async fn health_check_returns_ok() {
    let provider = Arc::new(MockRetrievalProvider::answering("unused"));

    let (status, body) = get_json(router_with(provider), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "rag-service");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = router_with(Arc::new(MockRetrievalProvider::answering("unused")));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn metrics_endpoint_responds_without_recorder() {
    let app = router_with(Arc::new(MockRetrievalProvider::answering("unused")));

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = router_with(Arc::new(MockRetrievalProvider::answering("unused")));

    let (status, _) = get_json(app, "/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn served_health_check_returns_ok() {
    let app = TestApp::spawn(MockRetrievalProvider::answering("unused")).await;

    let response = reqwest::Client::new()
        .get(format!("{}/health", app.address))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}
