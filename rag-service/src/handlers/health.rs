use crate::dtos::WelcomeResponse;
use axum::{response::IntoResponse, Json};
use serde_json::json;

/// `GET /`: fixed welcome payload, used as a liveness signal.
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse::default())
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "rag-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
