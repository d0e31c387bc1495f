//! End-to-end workflow test infrastructure.
//!
//! Spawns the front-end on a random port, pointed at a wiremock server
//! standing in for the hotel REST backend, and drives it with a
//! cookie-enabled HTTP client. Redirects are not followed so the workflow
//! steps stay observable.

use base64::{Engine as _, engine::general_purpose};
use serde_json::json;
use std::sync::Once;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use hotel_frontend::config::{HotelApiSettings, ServerSettings, Settings};
use hotel_frontend::startup::Application;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,workflow_tests=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Unsigned bearer token with the shape the front-end inspects.
pub fn test_token(user_id: &str, email: &str) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = json!({
        "sub": user_id,
        "email": email,
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    let payload = general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

/// A running front-end wired to a mocked hotel backend.
pub struct TestApp {
    pub address: String,
    pub backend: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        init_tracing();

        let backend = MockServer::start().await;

        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
                ..Default::default()
            },
            hotel_api: HotelApiSettings {
                base_url: backend.uri(),
            },
        };

        let application = Application::build(settings)
            .await
            .expect("failed to build application");
        let address = format!("http://127.0.0.1:{}", application.port());
        tokio::spawn(application.run_until_stopped());

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("failed to build client");

        Self {
            address,
            backend,
            client,
        }
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.address, route)
    }

    /// Mount the login mock and sign in, asserting the dashboard redirect.
    pub async fn login_as(&self, user_id: &str, email: &str) -> String {
        let token = test_token(user_id, email);

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
            .mount(&self.backend)
            .await;

        let response = self
            .client
            .post(self.url("/login"))
            .form(&[("email", email), ("password", "password123")])
            .send()
            .await
            .expect("login request failed");

        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/dashboard",
            "login should land on the dashboard"
        );
        token
    }
}

/// Matcher asserting the JSON request body has no `amount` field at all.
pub struct HasNoAmountField;

impl Match for HasNoAmountField {
    fn matches(&self, request: &Request) -> bool {
        serde_json::from_slice::<serde_json::Value>(&request.body)
            .map(|body| body.get("amount").is_none())
            .unwrap_or(false)
    }
}

// Canned backend payloads.

pub fn room_json(id: i64, rate: f64) -> serde_json::Value {
    json!({
        "id": id,
        "roomNumber": format!("{}01", id),
        "pricePerNight": rate,
        "capacity": 2,
        "available": true,
        "description": "Quiet room overlooking the garden",
        "roomType": "Standard",
        "amenities": ["Free WiFi"]
    })
}

pub fn booking_json(id: i64, room_id: i64, total: f64, confirmed: bool) -> serde_json::Value {
    json!({
        "id": id,
        "roomID": room_id,
        "room": room_json(room_id, total / 3.0),
        "clientName": "Ada Lovelace",
        "startDate": "2026-09-01",
        "endDate": "2026-09-04",
        "isConfirmed": confirmed,
        "totalPrice": total,
        "paymentID": if confirmed { json!("pay_9") } else { json!(null) }
    })
}

pub fn payment_json(payment_id: &str, booking_id: i64, total: f64, paid: f64) -> serde_json::Value {
    json!({
        "paymentID": payment_id,
        "bookingID": booking_id,
        "amount": total,
        "amountPaid": paid,
        "paymentType": "partial",
        "paymentDate": "2026-08-29",
        "cardNumber": "4111111111111111",
        "userID": "user_1"
    })
}

pub fn profile_json(user_id: &str, email: &str) -> serde_json::Value {
    json!({
        "userID": user_id,
        "completeName": "Ada Lovelace",
        "email": email
    })
}
