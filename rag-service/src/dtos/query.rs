use serde::{Deserialize, Serialize};
use validator::Validate;

pub const WELCOME_MESSAGE: &str = "Welcome to your RAG chatbot API!";

/// Query string for `GET /bedrock/query`.
///
/// A missing `text` deserializes to an empty string so both cases fail the
/// same validation rule.
#[derive(Debug, Deserialize, Validate)]
pub struct QueryParams {
    #[serde(default)]
    #[validate(length(min = 1, message = "text is required and must not be empty"))]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WelcomeResponse {
    pub message: String,
}

impl Default for WelcomeResponse {
    fn default() -> Self {
        Self {
            message: WELCOME_MESSAGE.to_string(),
        }
    }
}
