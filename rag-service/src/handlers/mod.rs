//! HTTP handlers for the RAG service.

pub mod health;
pub mod metrics;
pub mod query;

pub use health::{health_check, root};
pub use query::query_knowledge_base;
