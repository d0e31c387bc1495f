use askama::Template;
use axum::{extract::State, response::IntoResponse};

use crate::AppState;
use crate::models::AuthUser;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub name: String,
    pub email: String,
}

/// Landing view after login: greeting plus the search entry point.
///
/// A failed profile fetch falls back to what the session already knows
/// rather than blocking the page.
pub async fn dashboard(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    match state.api.current_user(&user.access_token).await {
        Ok(profile) => DashboardTemplate {
            name: profile.first_name().to_string(),
            email: profile.email,
        },
        Err(error) => {
            tracing::warn!(user_id = %user.user_id, "profile fetch failed: {}", error);
            DashboardTemplate {
                name: "Guest".to_string(),
                email: user.email,
            }
        }
    }
}
