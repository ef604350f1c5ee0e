use pdf_service::{
    config::PdfConfig,
    services::init_metrics,
    startup::{build_converter, Application},
};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = PdfConfig::load()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );
    init_metrics();

    tracing::info!(
        service = %config.service_name,
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        converter = %config.converter.wkhtmltopdf_path,
        serialize = config.converter.serialize,
        timeout_secs = ?config.converter.timeout_secs,
        "Starting PDF service"
    );

    let converter = build_converter(&config);
    let application = Application::build(config, converter).await?;
    application.run_until_stopped().await?;

    Ok(())
}
