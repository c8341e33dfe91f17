use rag_service::config::RagConfig;
use rag_service::services::metrics::init_metrics;
use rag_service::startup::Application;
use service_core::config as core_config;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let common = core_config::Config::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "rag-service",
        &common.log_level,
        common.otlp_endpoint.as_deref(),
    );

    // Refuse to start without a knowledge base and model to query.
    let config = RagConfig::from_env(common).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("{}", e)
    })?;

    init_metrics()?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("{}", e)
    })?;

    tracing::info!("Starting rag-service on port {}", app.port());
    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
