//! Router assembly and server lifecycle.

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use hotel_core::error::AppError;
use hotel_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::AppState;
use crate::config::Settings;
use crate::handlers::{
    app::{health_check, index},
    auth::{login_handler, login_page, logout_handler, register_handler, register_page},
    bookings::{booking_form, create_booking, my_bookings},
    confirmation::{confirmation, download_receipt},
    error::error_page,
    metrics::metrics_handler,
    payment::{payment_page, submit_payment},
    refunds::request_refund,
    rooms::{room_details, search_rooms},
    user::dashboard,
};
use crate::middleware::auth::auth_middleware;
use crate::services::HotelApiClient;

pub fn build_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    // Every view below requires a live session credential.
    let protected = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/booking/:room_id", get(booking_form).post(create_booking))
        .route("/payment/:booking_id", get(payment_page).post(submit_payment))
        .route("/confirmation/:payment_id", get(confirmation))
        .route("/bookings/:booking_id/receipt", get(download_receipt))
        .route("/my-bookings", get(my_bookings))
        .route("/my-bookings/:booking_id/refund", post(request_refund))
        .layer(from_fn(auth_middleware));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/error", get(error_page))
        .route("/login", get(login_page).post(login_handler))
        .route("/register", get(register_page).post(register_handler))
        .route("/logout", get(logout_handler))
        .route("/rooms", get(search_rooms))
        .route("/rooms/:room_id", get(room_details))
        .merge(protected)
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and assemble the router. Port 0 picks a random free
    /// port, which the tests rely on.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let api = Arc::new(HotelApiClient::new(settings.hotel_api.clone()));
        let state = AppState::new(api);
        let router = build_router(state);

        let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
            .parse()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("invalid listen address: {e}")))?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("hotel-frontend listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        axum::serve(self.listener, self.router)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
