pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use services::hotel_api::HotelApiClient;
use std::sync::Arc;

/// Session keys for the signed-in user's credential and identity.
pub const SESSION_TOKEN_KEY: &str = "access_token";
pub const SESSION_USER_ID_KEY: &str = "user_id";
pub const SESSION_EMAIL_KEY: &str = "email";

/// Shared application state: the typed client for the hotel backend.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<HotelApiClient>,
}

impl AppState {
    pub fn new(api: Arc<HotelApiClient>) -> Self {
        Self { api }
    }
}
