//! Mock provider implementation for testing.

use super::{ProviderError, RetrievalProvider, RetrievalRequest};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Owned copy of the last request seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub text: String,
    pub knowledge_base_id: String,
    pub model_arn: String,
}

/// Mock retrieval provider with a canned outcome.
pub struct MockRetrievalProvider {
    outcome: Result<String, ProviderError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<RecordedRequest>>,
}

impl MockRetrievalProvider {
    /// Always answer with `text`.
    pub fn answering(text: impl Into<String>) -> Self {
        Self::with_outcome(Ok(text.into()))
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<String, ProviderError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of times the provider has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RetrievalProvider for MockRetrievalProvider {
    async fn retrieve_and_generate(
        &self,
        request: &RetrievalRequest<'_>,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(RecordedRequest {
                text: request.text.to_string(),
                knowledge_base_id: request.knowledge_base_id.to_string(),
                model_arn: request.model_arn.to_string(),
            });
        }

        self.outcome.clone()
    }
}
