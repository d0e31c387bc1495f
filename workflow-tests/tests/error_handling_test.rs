//! Backend and transport failures mapped onto the error view.

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};
use workflow_tests::TestApp;

use hotel_frontend::config::{HotelApiSettings, ServerSettings, Settings};
use hotel_frontend::startup::Application;

#[tokio::test]
async fn missing_room_renders_the_backend_message() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/rooms/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Room not found",
            "cause": "no room with id 9",
            "statusCode": 404,
            "timestamp": 1756400000000u64,
            "path": "/api/rooms/9",
            "errorCode": "HTTP_404"
        })))
        .mount(&app.backend)
        .await;

    let response = app.client.get(app.url("/rooms/9")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.text().await.unwrap();
    assert!(body.contains("Room not found"));
    assert!(body.contains("HTTP_404"));
}

#[tokio::test]
async fn backend_failure_surfaces_as_bad_gateway() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/rooms"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&app.backend)
        .await;

    let response = app.client.get(app.url("/rooms")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response.text().await.unwrap();
    assert!(body.contains("Internal Server Error"));
}

#[tokio::test]
async fn unreachable_backend_surfaces_as_service_unavailable() {
    // Point the front-end at a port nothing listens on.
    let settings = Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        },
        hotel_api: HotelApiSettings {
            base_url: "http://127.0.0.1:1".to_string(),
        },
    };
    let application = Application::build(settings).await.unwrap();
    let address = format!("http://127.0.0.1:{}", application.port());
    tokio::spawn(application.run_until_stopped());

    let response = reqwest::get(format!("{}/rooms", address)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response.text().await.unwrap();
    assert!(body.contains("Network Error"));
}
