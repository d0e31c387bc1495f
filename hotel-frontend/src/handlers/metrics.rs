use axum::{http::header, response::IntoResponse};
use hotel_core::middleware::metrics::render_metrics;

/// Prometheus text exposition.
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        render_metrics(),
    )
}
