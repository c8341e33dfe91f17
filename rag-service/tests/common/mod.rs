#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use rag_service::config::{AwsConfig, KnowledgeBaseConfig, RagConfig};
use rag_service::services::providers::mock::MockRetrievalProvider;
use rag_service::startup::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_KNOWLEDGE_BASE_ID: &str = "KBTEST1234";
pub const TEST_MODEL_ARN: &str =
    "arn:aws:bedrock:us-east-2::foundation-model/anthropic.claude-3-haiku-20240307-v1:0";

pub fn test_config() -> RagConfig {
    RagConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        aws: AwsConfig {
            region: "us-east-2".to_string(),
            timeout_secs: 5,
        },
        knowledge_base: KnowledgeBaseConfig {
            id: TEST_KNOWLEDGE_BASE_ID.to_string(),
            model_arn: TEST_MODEL_ARN.to_string(),
        },
    }
}

/// Router wired to `provider`, for in-process requests.
pub fn router_with(provider: Arc<MockRetrievalProvider>) -> Router {
    build_router(AppState::new(test_config(), provider))
}

/// Issue a GET through the router and decode the JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub struct TestApp {
    pub address: String,
    pub provider: Arc<MockRetrievalProvider>,
}

impl TestApp {
    /// Serve the full application on a random port backed by `provider`.
    pub async fn spawn(provider: MockRetrievalProvider) -> Self {
        let provider = Arc::new(provider);
        let app = Application::with_provider(test_config(), provider.clone())
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(format!("{}/health", address)).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }

        Self { address, provider }
    }
}
