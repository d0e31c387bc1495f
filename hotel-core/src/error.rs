use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error payload carried to the error view.
///
/// This mirrors the contract of the booking backend's error responses, so a
/// backend-produced payload can be passed through to the user unchanged and a
/// locally-produced one looks the same.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    pub status_code: u16,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub path: String,
    /// Machine-readable code, e.g. `HTTP_404` or `NETWORK_ERROR`.
    pub error_code: String,
}

/// Coarse classification of an error for view routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    NotFound,
    Server,
    Network,
    General,
}

impl ErrorMessage {
    /// Build a payload from a bare HTTP status.
    pub fn from_status(status: u16, path: &str) -> Self {
        Self {
            message: http_status_text(status).to_string(),
            cause: None,
            status_code: status,
            timestamp: Utc::now().timestamp_millis(),
            path: path.to_string(),
            error_code: format!("HTTP_{}", status),
        }
    }

    /// Build a payload for a transport-level failure (no response at all).
    pub fn network(path: &str) -> Self {
        Self {
            message: "Network Error".to_string(),
            cause: Some(
                "Unable to connect to the server. Please check your internet connection."
                    .to_string(),
            ),
            status_code: 0,
            timestamp: Utc::now().timestamp_millis(),
            path: path.to_string(),
            error_code: "NETWORK_ERROR".to_string(),
        }
    }

    /// Fill in fields a backend payload may have omitted.
    pub fn normalized(mut self, fallback_status: u16, path: &str) -> Self {
        if self.status_code == 0 && fallback_status != 0 {
            self.status_code = fallback_status;
        }
        if self.timestamp == 0 {
            self.timestamp = Utc::now().timestamp_millis();
        }
        if self.path.is_empty() {
            self.path = path.to_string();
        }
        if self.error_code.is_empty() {
            self.error_code = format!("HTTP_{}", self.status_code);
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status_code {
            0 => ErrorKind::Network,
            401 | 403 => ErrorKind::Auth,
            404 => ErrorKind::NotFound,
            s if s >= 500 => ErrorKind::Server,
            _ => ErrorKind::General,
        }
    }
}

/// Human-readable text for the HTTP statuses the backend is known to return.
pub fn http_status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized - Please log in",
        403 => "Forbidden - You don't have permission",
        404 => "Not Found",
        408 => "Request Timeout",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "HTTP Error",
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(anyhow::Error),

    #[error("Forbidden: {0}")]
    Forbidden(anyhow::Error),

    /// The booking backend answered with a non-success status; the payload
    /// carries whatever structure the backend provided.
    #[error("Upstream error: {}", .0.message)]
    Upstream(ErrorMessage),

    /// The booking backend could not be reached at all.
    #[error("Network error: {0}")]
    Network(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Convert this error into the structured payload the error view renders.
    pub fn to_error_message(&self, path: &str) -> ErrorMessage {
        match self {
            AppError::Upstream(payload) => payload.clone(),
            AppError::Network(err) => {
                let mut msg = ErrorMessage::network(path);
                msg.cause = Some(err.to_string());
                msg
            }
            other => {
                let status = other.status_code().as_u16();
                let mut msg = ErrorMessage::from_status(status, path);
                msg.cause = Some(other.to_string());
                msg
            }
        }
    }

    /// HTTP status this error maps to when surfaced by the front-end.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            // Client-class backend statuses pass through; server failures
            // surface as a bad gateway.
            AppError::Upstream(payload) => match payload.status_code {
                code @ 400..=499 => {
                    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
                }
                _ => StatusCode::BAD_GATEWAY,
            },
            AppError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // Status errors are mapped by the API client before they get here, so
        // anything reaching this conversion is a transport-level failure.
        AppError::Network(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let status = self.status_code();
        let (error_message, details) = match &self {
            AppError::ValidationError(err) => ("Validation error".to_string(), Some(err.to_string())),
            AppError::Upstream(payload) => (payload.message.clone(), payload.cause.clone()),
            AppError::Network(err) => ("Service unavailable".to_string(), Some(err.to_string())),
            AppError::InternalError(err) => (
                "Internal server error".to_string(),
                Some(format!("{:#}", err)),
            ),
            AppError::ConfigError(err) => ("Configuration error".to_string(), Some(err.to_string())),
            other => (other.to_string(), None),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_payload_parses_camel_case() {
        let body = r#"{
            "message": "Booking not found",
            "cause": "no booking with id 42",
            "statusCode": 404,
            "timestamp": 1736500000000,
            "path": "/api/bookings/42",
            "errorCode": "HTTP_404"
        }"#;

        let payload: ErrorMessage = serde_json::from_str(body).unwrap();
        assert_eq!(payload.status_code, 404);
        assert_eq!(payload.error_code, "HTTP_404");
        assert_eq!(payload.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn classification_follows_status() {
        assert_eq!(ErrorMessage::from_status(401, "/x").kind(), ErrorKind::Auth);
        assert_eq!(ErrorMessage::from_status(403, "/x").kind(), ErrorKind::Auth);
        assert_eq!(
            ErrorMessage::from_status(404, "/x").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ErrorMessage::from_status(503, "/x").kind(),
            ErrorKind::Server
        );
        assert_eq!(ErrorMessage::network("/x").kind(), ErrorKind::Network);
        assert_eq!(
            ErrorMessage::from_status(409, "/x").kind(),
            ErrorKind::General
        );
    }

    #[test]
    fn upstream_5xx_surfaces_as_bad_gateway() {
        let err = AppError::Upstream(ErrorMessage::from_status(500, "/api/rooms"));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn upstream_auth_passes_through() {
        let err = AppError::Upstream(ErrorMessage::from_status(401, "/api/bookings"));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn normalized_fills_missing_fields() {
        let sparse = ErrorMessage {
            message: "boom".to_string(),
            cause: None,
            status_code: 0,
            timestamp: 0,
            path: String::new(),
            error_code: String::new(),
        };
        let full = sparse.normalized(500, "/api/payments");
        assert_eq!(full.status_code, 500);
        assert_eq!(full.path, "/api/payments");
        assert_eq!(full.error_code, "HTTP_500");
        assert!(full.timestamp > 0);
    }
}
