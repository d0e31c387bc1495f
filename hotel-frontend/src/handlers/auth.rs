use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use validator::Validate;

use crate::models::RegisterRequest;
use crate::utils::jwt::decode_claims;
use crate::{AppState, SESSION_EMAIL_KEY, SESSION_TOKEN_KEY, SESSION_USER_ID_KEY};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub complete_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        error: String::new(),
    }
}

pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        error: String::new(),
    }
}

fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .filter_map(|error| error.message.as_ref())
        .map(|message| message.to_string())
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

async fn store_session(
    session: &Session,
    token: &str,
    user_id: &str,
    email: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(SESSION_TOKEN_KEY, token).await?;
    session.insert(SESSION_USER_ID_KEY, user_id).await?;
    session.insert(SESSION_EMAIL_KEY, email).await
}

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<LoginForm>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return LoginTemplate {
            error: first_validation_message(&errors),
        }
        .into_response();
    }

    let tokens = match state.api.login(&payload.email, &payload.password).await {
        Ok(tokens) => tokens,
        Err(error) => {
            tracing::warn!(email = %payload.email, "login rejected: {}", error);
            return LoginTemplate {
                error: error.to_error_message("/login").message,
            }
            .into_response();
        }
    };

    let claims = match decode_claims(&tokens.token) {
        Ok(claims) => claims,
        Err(error) => {
            tracing::error!("login token is not decodable: {}", error);
            return LoginTemplate {
                error: "Authentication error".to_string(),
            }
            .into_response();
        }
    };

    let email = claims.email.clone().unwrap_or(payload.email);
    let stored = store_session(&session, &tokens.token, &claims.sub, &email).await;
    if let Err(error) = stored {
        tracing::error!("failed to persist session: {}", error);
        return LoginTemplate {
            error: "Authentication error".to_string(),
        }
        .into_response();
    }

    tracing::info!(user_id = %claims.sub, "user logged in");
    Redirect::to("/dashboard").into_response()
}

pub async fn register_handler(
    State(state): State<AppState>,
    Form(payload): Form<RegisterForm>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return RegisterTemplate {
            error: first_validation_message(&errors),
        }
        .into_response();
    }

    let request = RegisterRequest {
        complete_name: payload.complete_name,
        email: payload.email,
        password: payload.password,
    };

    match state.api.register(&request).await {
        Ok(()) => {
            tracing::info!(email = %request.email, "user registered");
            Redirect::to("/login").into_response()
        }
        Err(error) => {
            tracing::warn!(email = %request.email, "registration rejected: {}", error);
            RegisterTemplate {
                error: error.to_error_message("/register").message,
            }
            .into_response()
        }
    }
}

pub async fn logout_handler(session: Session) -> impl IntoResponse {
    if let Err(error) = session.flush().await {
        tracing::warn!("failed to flush session on logout: {}", error);
    }
    Redirect::to("/")
}
