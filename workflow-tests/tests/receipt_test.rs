//! PDF receipt passthrough.

use reqwest::StatusCode;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};
use workflow_tests::TestApp;

#[tokio::test]
async fn receipt_passes_the_pdf_through_unchanged() {
    let app = TestApp::spawn().await;
    app.login_as("user_1", "ada@example.com").await;

    let pdf = b"%PDF-1.4 fake receipt".to_vec();
    Mock::given(method("GET"))
        .and(path("/bookings/42/report"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(pdf.clone())
                .insert_header("content-type", "application/pdf")
                .insert_header(
                    "content-disposition",
                    "attachment; filename=\"booking-42.pdf\"",
                ),
        )
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .get(app.url("/bookings/42/receipt"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers()["content-disposition"].to_str().unwrap(),
        "attachment; filename=\"booking-42.pdf\""
    );
    assert_eq!(response.bytes().await.unwrap().to_vec(), pdf);
}

#[tokio::test]
async fn missing_report_renders_the_error_view() {
    let app = TestApp::spawn().await;
    app.login_as("user_1", "ada@example.com").await;

    Mock::given(method("GET"))
        .and(path("/bookings/42/report"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .get(app.url("/bookings/42/receipt"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
