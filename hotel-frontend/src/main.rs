use hotel_core::error::AppError;
use hotel_core::middleware::metrics::init_metrics;
use hotel_core::observability::init_tracing;
use hotel_frontend::config::get_configuration;
use hotel_frontend::startup::Application;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let settings = get_configuration()?;

    init_tracing("hotel-frontend", "info", &settings.server.otlp_endpoint)?;
    init_metrics();

    let application = Application::build(settings).await?;
    application.run_until_stopped().await
}
