use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::SESSION_TOKEN_KEY;
use crate::utils::jwt::token_is_current;

/// Gate protected views on a live session credential.
///
/// Runs before any handler work, so an unauthenticated request never reaches
/// the hotel backend. Expired tokens count as absent.
pub async fn auth_middleware(session: Session, request: Request, next: Next) -> Response {
    let token: Option<String> = session.get(SESSION_TOKEN_KEY).await.unwrap_or(None);

    match token {
        Some(token) if token_is_current(&token) => next.run(request).await,
        _ => {
            tracing::debug!(path = %request.uri().path(), "unauthenticated request, redirecting to login");
            Redirect::to("/login").into_response()
        }
    }
}
