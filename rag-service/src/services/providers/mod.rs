//! Retrieval provider abstraction.
//!
//! The façade only ever needs one capability from the managed service:
//! retrieve passages from a knowledge base and generate an answer from them.
//! Implementations live behind [`RetrievalProvider`] so the HTTP layer can be
//! exercised against [`mock::MockRetrievalProvider`].

pub mod bedrock;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API error: {0}")]
    ApiError(String),
}

impl ProviderError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::InvalidRequest(_) => "invalid_request",
            ProviderError::AccessDenied(_) => "access_denied",
            ProviderError::NotFound(_) => "not_found",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::NetworkError(_) => "network",
            ProviderError::MalformedResponse(_) => "malformed_response",
            ProviderError::ApiError(_) => "api",
        }
    }
}

/// Every provider failure is relayed as a 500 with the provider's description.
/// Listed without a wildcard so a new kind has to pick its status here.
impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidRequest(_)
            | ProviderError::AccessDenied(_)
            | ProviderError::NotFound(_)
            | ProviderError::RateLimited(_)
            | ProviderError::Timeout(_)
            | ProviderError::NetworkError(_)
            | ProviderError::MalformedResponse(_)
            | ProviderError::ApiError(_) => AppError::UpstreamError(err.to_string()),
        }
    }
}

/// One retrieve-and-generate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalRequest<'a> {
    pub text: &'a str,
    pub knowledge_base_id: &'a str,
    pub model_arn: &'a str,
}

/// Trait for managed retrieval-augmented generation backends (e.g., Bedrock).
#[async_trait]
pub trait RetrievalProvider: Send + Sync {
    /// Retrieve from the knowledge base and return the generated answer text.
    async fn retrieve_and_generate(
        &self,
        request: &RetrievalRequest<'_>,
    ) -> Result<String, ProviderError>;
}
