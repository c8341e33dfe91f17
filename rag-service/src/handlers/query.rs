use crate::dtos::{QueryParams, QueryResponse};
use crate::services::{metrics, RetrievalRequest};
use crate::startup::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use service_core::error::AppError;
use std::time::Instant;
use validator::Validate;

/// `GET /bedrock/query?text=...`
///
/// Forwards the caller's text to the knowledge base and relays the generated
/// answer. Invalid input is rejected before the provider is touched; every
/// provider failure comes back as a 500 carrying its description.
pub async fn query_knowledge_base(
    State(state): State<AppState>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<QueryResponse>, AppError> {
    let Query(params) = params?;
    params.validate()?;

    let knowledge_base = &state.config.knowledge_base;
    let request = RetrievalRequest {
        text: &params.text,
        knowledge_base_id: &knowledge_base.id,
        model_arn: &knowledge_base.model_arn,
    };

    let started = Instant::now();
    let result = state.provider.retrieve_and_generate(&request).await;
    let elapsed = started.elapsed();

    match result {
        Ok(response) => {
            metrics::record_query("success", elapsed);
            tracing::info!(
                knowledge_base_id = %knowledge_base.id,
                latency_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                response_len = response.len(),
                "Knowledge base query answered"
            );
            Ok(Json(QueryResponse { response }))
        }
        Err(e) => {
            metrics::record_query(e.kind(), elapsed);
            tracing::error!(
                knowledge_base_id = %knowledge_base.id,
                error_kind = e.kind(),
                latency_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "Knowledge base query failed: {}",
                e
            );
            Err(e.into())
        }
    }
}
