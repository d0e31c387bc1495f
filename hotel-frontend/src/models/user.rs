use crate::utils::jwt::token_is_current;
use crate::{SESSION_EMAIL_KEY, SESSION_TOKEN_KEY, SESSION_USER_ID_KEY};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Current-user profile as served by the hotel backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub complete_name: String,
    pub email: String,
}

impl UserProfile {
    pub fn first_name(&self) -> &str {
        self.complete_name
            .split_whitespace()
            .next()
            .unwrap_or("Guest")
    }
}

/// Login response from the hotel backend.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Registration payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub complete_name: String,
    pub email: String,
    pub password: String,
}

/// Authenticated user context extracted from the session.
///
/// Rejects with a redirect to the login view when the stored credential is
/// missing or expired, before any backend fetch happens. This is a UX
/// convenience only; the backend still rejects unauthorized requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to extract session",
                )
                    .into_response()
            })?;

        let access_token: Option<String> = session.get(SESSION_TOKEN_KEY).await.unwrap_or(None);
        let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await.unwrap_or(None);
        let email: Option<String> = session.get(SESSION_EMAIL_KEY).await.unwrap_or(None);

        match (access_token, user_id, email) {
            (Some(token), Some(uid), Some(email_val)) if token_is_current(&token) => Ok(AuthUser {
                user_id: uid,
                email: email_val,
                access_token: token,
            }),
            _ => Err(Redirect::to("/login").into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_name_splits_complete_name() {
        let profile = UserProfile {
            user_id: "user_123".to_string(),
            complete_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        };
        assert_eq!(profile.first_name(), "Ada");
    }

    #[test]
    fn first_name_falls_back_for_empty_name() {
        let profile = UserProfile {
            user_id: "user_123".to_string(),
            complete_name: String::new(),
            email: "ada@example.com".to_string(),
        };
        assert_eq!(profile.first_name(), "Guest");
    }

    #[test]
    fn profile_parses_backend_shape() {
        let body = r#"{"userID":"7","completeName":"Ada Lovelace","email":"ada@example.com"}"#;
        let profile: UserProfile = serde_json::from_str(body).unwrap();
        assert_eq!(profile.user_id, "7");
        assert_eq!(profile.email, "ada@example.com");
    }
}
