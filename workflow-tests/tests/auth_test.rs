//! Session gating and credential expiry.

use base64::{Engine as _, engine::general_purpose};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};
use workflow_tests::TestApp;

#[tokio::test]
async fn anonymous_users_are_redirected_before_any_backend_call() {
    let app = TestApp::spawn().await;

    for route in ["/dashboard", "/my-bookings", "/payment/42", "/booking/5"] {
        let response = app.client.get(app.url(route)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {}", route);
        assert_eq!(response.headers()["location"], "/login", "GET {}", route);
    }

    let received = app.backend.received_requests().await.unwrap_or_default();
    assert!(
        received.is_empty(),
        "backend saw {} requests before login",
        received.len()
    );
}

#[tokio::test]
async fn expired_token_counts_as_logged_out() {
    let app = TestApp::spawn().await;

    // Login succeeds but the issued token is already expired.
    let claims = json!({ "sub": "user_1", "email": "ada@example.com", "exp": 1000 });
    let payload = general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());
    let expired = format!("header.{}.signature", payload);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": expired })))
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .post(app.url("/login"))
        .form(&[("email", "ada@example.com"), ("password", "password123")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .client
        .get(app.url("/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
async fn rejected_login_stays_on_the_form() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid email or password",
            "statusCode": 401,
            "timestamp": 1756400000000u64,
            "path": "/api/auth/login",
            "errorCode": "HTTP_401"
        })))
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .post(app.url("/login"))
        .form(&[("email", "ada@example.com"), ("password", "wrong")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid email or password"));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = TestApp::spawn().await;
    app.login_as("user_1", "ada@example.com").await;

    let response = app.client.get(app.url("/logout")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let response = app
        .client
        .get(app.url("/my-bookings"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
}
