//! Refund flow: the amount is always computed server-side.

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};
use workflow_tests::{HasNoAmountField, TestApp, booking_json, payment_json};

fn refund_json() -> serde_json::Value {
    json!({
        "refundID": "ref_1",
        "paymentID": "pay_9",
        "amount": 225.0,
        "refundDate": "2026-08-30"
    })
}

#[tokio::test]
async fn refund_uses_the_bookings_payment_reference() {
    let app = TestApp::spawn().await;
    app.login_as("user_1", "ada@example.com").await;

    Mock::given(method("GET"))
        .and(path("/bookings/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json(42, 5, 450.0, true)))
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/pay_9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(payment_json("pay_9", 42, 450.0, 450.0)),
        )
        .expect(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/refunds/calculate"))
        .and(body_partial_json(json!({ "paymentID": "pay_9" })))
        .and(HasNoAmountField)
        .respond_with(ResponseTemplate::new(200).set_body_json(refund_json()))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .post(app.url("/my-bookings/42/refund"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("225.00"));
    assert!(body.contains("pay_9"));
}

#[tokio::test]
async fn refund_falls_back_to_lookup_by_booking() {
    let app = TestApp::spawn().await;
    app.login_as("user_1", "ada@example.com").await;

    // Booking without a direct payment reference.
    Mock::given(method("GET"))
        .and(path("/bookings/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json(42, 5, 450.0, false)))
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/booking/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(payment_json("pay_9", 42, 450.0, 450.0)),
        )
        .expect(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/refunds/calculate"))
        .and(HasNoAmountField)
        .respond_with(ResponseTemplate::new(200).set_body_json(refund_json()))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .post(app.url("/my-bookings/42/refund"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn failed_refund_surfaces_the_backend_error() {
    let app = TestApp::spawn().await;
    app.login_as("user_1", "ada@example.com").await;

    Mock::given(method("GET"))
        .and(path("/bookings/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json(42, 5, 450.0, true)))
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/pay_9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(payment_json("pay_9", 42, 450.0, 450.0)),
        )
        .mount(&app.backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/refunds/calculate"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Refund window has closed",
            "statusCode": 422,
            "timestamp": 1756400000000u64,
            "path": "/api/refunds/calculate",
            "errorCode": "HTTP_422"
        })))
        .mount(&app.backend)
        .await;

    let response = app
        .client
        .post(app.url("/my-bookings/42/refund"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text().await.unwrap();
    assert!(body.contains("Refund window has closed"));
}
