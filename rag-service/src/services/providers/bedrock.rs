//! Bedrock Agent Runtime provider.
//!
//! Calls `RetrieveAndGenerate` against a Bedrock knowledge base and returns
//! the generated text. Citations in the response are not surfaced.

use super::{ProviderError, RetrievalProvider, RetrievalRequest};
use crate::config::AwsConfig;
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockagentruntime::config::Region;
use aws_sdk_bedrockagentruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockagentruntime::operation::retrieve_and_generate::RetrieveAndGenerateError;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseRetrieveAndGenerateConfiguration, RetrieveAndGenerateConfiguration,
    RetrieveAndGenerateInput, RetrieveAndGenerateType,
};
use aws_sdk_bedrockagentruntime::Client;

/// Bedrock retrieve-and-generate provider.
///
/// The SDK client is cheap to clone and safe to share across requests.
#[derive(Clone)]
pub struct BedrockRetrievalProvider {
    client: Client,
}

impl BedrockRetrievalProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client bound to the configured region. Credentials come from
    /// the default AWS provider chain.
    pub async fn from_config(config: &AwsConfig) -> Self {
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(config.timeout())
            .build();

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .timeout_config(timeout_config)
            .load()
            .await;

        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl RetrievalProvider for BedrockRetrievalProvider {
    async fn retrieve_and_generate(
        &self,
        request: &RetrievalRequest<'_>,
    ) -> Result<String, ProviderError> {
        let input = RetrieveAndGenerateInput::builder()
            .text(request.text)
            .build()
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        let knowledge_base = KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
            .knowledge_base_id(request.knowledge_base_id)
            .model_arn(request.model_arn)
            .build()
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        let configuration = RetrieveAndGenerateConfiguration::builder()
            .r#type(RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(knowledge_base)
            .build()
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        tracing::debug!(
            knowledge_base_id = %request.knowledge_base_id,
            model_arn = %request.model_arn,
            query_len = request.text.len(),
            "Sending RetrieveAndGenerate request to Bedrock"
        );

        let response = self
            .client
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(configuration)
            .send()
            .await
            .map_err(classify_sdk_error)?;

        response
            .output()
            .map(|output| output.text().to_string())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("response carried no generated output".to_string())
            })
    }
}

/// Sort SDK failures into provider error kinds, keeping the full error chain
/// as the message.
fn classify_sdk_error(err: SdkError<RetrieveAndGenerateError>) -> ProviderError {
    let message = DisplayErrorContext(&err).to_string();

    match &err {
        SdkError::TimeoutError(_) => ProviderError::Timeout(message),
        SdkError::DispatchFailure(failure) if failure.is_timeout() => {
            ProviderError::Timeout(message)
        }
        SdkError::DispatchFailure(_) => ProviderError::NetworkError(message),
        SdkError::ResponseError(_) => ProviderError::MalformedResponse(message),
        SdkError::ServiceError(service_err) => {
            let e = service_err.err();
            if e.is_throttling_exception() || e.is_service_quota_exceeded_exception() {
                ProviderError::RateLimited(message)
            } else if e.is_access_denied_exception() {
                ProviderError::AccessDenied(message)
            } else if e.is_validation_exception() {
                ProviderError::InvalidRequest(message)
            } else if e.is_resource_not_found_exception() {
                ProviderError::NotFound(message)
            } else {
                ProviderError::ApiError(message)
            }
        }
        _ => ProviderError::ApiError(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdk_timeout_becomes_timeout() {
        let err: SdkError<RetrieveAndGenerateError> =
            SdkError::timeout_error("operation deadline exceeded");

        assert!(matches!(classify_sdk_error(err), ProviderError::Timeout(_)));
    }

    #[test]
    fn construction_failure_is_an_api_error() {
        let err: SdkError<RetrieveAndGenerateError> =
            SdkError::construction_failure("no credentials");

        let classified = classify_sdk_error(err);
        assert!(matches!(classified, ProviderError::ApiError(_)));
        assert!(classified.to_string().contains("no credentials"));
    }
}
