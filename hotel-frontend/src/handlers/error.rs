use askama::Template;
use axum::{
    extract::{OriginalUri, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hotel_core::error::{AppError, ErrorMessage, http_status_text};
use serde::Deserialize;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status_code: u16,
    pub status_text: String,
    pub message: String,
    pub cause: String,
    pub error_code: String,
    pub path: String,
}

impl ErrorTemplate {
    pub fn from_payload(payload: &ErrorMessage) -> Self {
        Self {
            status_code: payload.status_code,
            status_text: http_status_text(payload.status_code).to_string(),
            message: payload.message.clone(),
            cause: payload.cause.clone().unwrap_or_default(),
            error_code: payload.error_code.clone(),
            path: payload.path.clone(),
        }
    }
}

/// A handler failure bound to the view path it happened on.
///
/// Renders the error template with the backend's structured payload instead
/// of the bare JSON body the core error type produces.
#[derive(Debug)]
pub struct PageError {
    error: AppError,
    path: String,
}

impl PageError {
    pub fn new(error: AppError, path: impl Into<String>) -> Self {
        Self {
            error,
            path: path.into(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let payload = self.error.to_error_message(&self.path);
        tracing::error!(
            status = payload.status_code,
            path = %payload.path,
            code = %payload.error_code,
            "rendering error view: {}",
            payload.message
        );

        let status = StatusCode::from_u16(payload.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, ErrorTemplate::from_payload(&payload)).into_response()
    }
}

/// Shorthand for handlers: bind an upstream failure to the current path.
pub fn on_page(path: &str) -> impl Fn(AppError) -> PageError + '_ {
    move |error| PageError::new(error, path)
}

#[derive(Deserialize)]
pub struct ErrorQuery {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

/// Generic error view, reachable directly for errors carried across a
/// redirect.
pub async fn error_page(
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ErrorQuery>,
) -> impl IntoResponse {
    let status = query.status.unwrap_or(500);
    let mut payload = ErrorMessage::from_status(status, uri.path());
    if let Some(message) = query.message {
        payload.message = message;
    }

    let status =
        StatusCode::from_u16(payload.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, ErrorTemplate::from_payload(&payload))
}
