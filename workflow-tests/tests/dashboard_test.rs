//! Dashboard and bookings list.

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};
use workflow_tests::{TestApp, booking_json, profile_json};

#[tokio::test]
async fn dashboard_greets_by_first_name() {
    let app = TestApp::spawn().await;
    app.login_as("user_1", "ada@example.com").await;

    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(profile_json("user_1", "ada@example.com")),
        )
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .get(app.url("/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Welcome, Ada"));
}

#[tokio::test]
async fn dashboard_falls_back_to_the_session_on_profile_failure() {
    let app = TestApp::spawn().await;
    app.login_as("user_1", "ada@example.com").await;

    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .get(app.url("/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("ada@example.com"));
}

#[tokio::test]
async fn bookings_list_shows_stage_per_booking() {
    let app = TestApp::spawn().await;
    app.login_as("user_1", "ada@example.com").await;

    Mock::given(method("GET"))
        .and(path("/bookings/user/user_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booking_json(42, 5, 450.0, true),
            booking_json(43, 6, 300.0, false),
        ])))
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .get(app.url("/my-bookings"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Confirmed"));
    assert!(body.contains("Awaiting payment"));
    assert!(body.contains("450.00"));
    assert!(body.contains("300.00"));
}
