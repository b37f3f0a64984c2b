use carfify_service::config::CarfifyConfig;
use carfify_service::services::init_metrics;
use carfify_service::Application;
use dotenvy::dotenv;
use service_core::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = CarfifyConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        &configuration.service_name,
        &configuration.log_level,
        configuration.otlp_endpoint.as_deref(),
    );

    init_metrics();

    let application = Application::build(configuration).await?;

    info!("Starting carfify-service on port {}", application.port());
    application.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
