//! Prometheus metrics for rag-service.
//!
//! HTTP request metrics come from the shared middleware; this module adds
//! provider call metrics and owns the exporter handle.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Call once at startup.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!(
            "failed to install Prometheus recorder: {}",
            e
        ))
    })?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| AppError::InternalError(anyhow::anyhow!("metrics already initialized")))
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record one knowledge base query. `outcome` is `success` or a
/// [`ProviderError::kind`](super::ProviderError::kind) label.
pub fn record_query(outcome: &'static str, elapsed: Duration) {
    counter!("rag_queries_total", "outcome" => outcome).increment(1);
    histogram!("rag_provider_latency_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}
