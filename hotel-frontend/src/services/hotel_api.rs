//! Typed client for the external hotel REST backend.
//!
//! Every call is plain request/response JSON over HTTP (the PDF receipt is
//! the one binary exception). Non-success statuses are mapped to
//! [`AppError::Upstream`] carrying the backend's structured error payload
//! when one is present. There is no retry or backoff anywhere in this layer.

use crate::config::HotelApiSettings;
use crate::models::{
    Booking, NewBooking, NewPayment, Payment, Refund, RefundRequest, RegisterRequest, Room,
    TokenResponse, UserProfile,
};
use hotel_core::error::{AppError, ErrorMessage};
use hotel_core::observability::TracedClientExt;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct HotelApiClient {
    client: Client,
    settings: HotelApiSettings,
}

impl HotelApiClient {
    pub fn new(settings: HotelApiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url, path)
    }

    /// Map a non-success response to an error, preserving the backend's
    /// structured payload when the body parses as one.
    fn upstream_error(status: u16, body: &str, path: &str) -> AppError {
        let payload = serde_json::from_str::<ErrorMessage>(body)
            .map(|m| m.normalized(status, path))
            .unwrap_or_else(|_| ErrorMessage::from_status(status, path));

        tracing::warn!(
            status = status,
            path = %path,
            code = %payload.error_code,
            message = %payload.message,
            "hotel backend returned an error"
        );
        AppError::Upstream(payload)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, AppError> {
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, path = %path, "hotel backend response");

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                AppError::InternalError(anyhow::anyhow!(
                    "unexpected response body from {}: {}",
                    path,
                    e
                ))
            })
        } else {
            Err(Self::upstream_error(status.as_u16(), &body, path))
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, AppError> {
        let mut request = self.client.traced_get(&self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Self::decode(response, path).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, AppError> {
        let mut request = self.client.traced_post(&self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Self::decode(response, path).await
    }

    // Authentication

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, AppError> {
        self.post_json(
            "/auth/login",
            None,
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
        let _: serde_json::Value = self.post_json("/auth/register", None, request).await?;
        Ok(())
    }

    pub async fn current_user(&self, token: &str) -> Result<UserProfile, AppError> {
        self.get_json("/users/profile", Some(token)).await
    }

    // Rooms

    pub async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        self.get_json("/rooms", None).await
    }

    pub async fn room(&self, id: i64) -> Result<Room, AppError> {
        self.get_json(&format!("/rooms/{}", id), None).await
    }

    // Bookings

    pub async fn create_booking(
        &self,
        token: &str,
        booking: &NewBooking,
    ) -> Result<Booking, AppError> {
        self.post_json("/bookings", Some(token), booking).await
    }

    pub async fn booking(&self, token: &str, id: i64) -> Result<Booking, AppError> {
        self.get_json(&format!("/bookings/{}", id), Some(token))
            .await
    }

    pub async fn bookings_for_user(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Vec<Booking>, AppError> {
        self.get_json(&format!("/bookings/user/{}", user_id), Some(token))
            .await
    }

    /// Fetch the PDF receipt for a booking. Returns the raw response so the
    /// caller can pass bytes and headers through untouched.
    pub async fn booking_report(
        &self,
        token: &str,
        booking_id: i64,
    ) -> Result<reqwest::Response, AppError> {
        let path = format!("/bookings/{}/report", booking_id);
        let response = self
            .client
            .traced_get(&self.url(&path))
            .bearer_auth(token)
            .header("accept", "application/pdf")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Self::upstream_error(status.as_u16(), &body, &path))
        }
    }

    // Payments

    pub async fn create_payment(
        &self,
        token: &str,
        payment: &NewPayment,
    ) -> Result<Payment, AppError> {
        self.post_json("/payments", Some(token), payment).await
    }

    pub async fn payment(&self, token: &str, payment_id: &str) -> Result<Payment, AppError> {
        self.get_json(&format!("/payments/{}", payment_id), Some(token))
            .await
    }

    /// Fallback lookup when a booking carries no direct payment reference.
    pub async fn payment_for_booking(
        &self,
        token: &str,
        booking_id: i64,
    ) -> Result<Payment, AppError> {
        self.get_json(&format!("/payments/booking/{}", booking_id), Some(token))
            .await
    }

    // Refunds

    /// Ask the backend to compute and record a refund for a payment. The
    /// amount is never supplied from this side.
    pub async fn calculate_refund(
        &self,
        token: &str,
        request: &RefundRequest,
    ) -> Result<Refund, AppError> {
        self.post_json("/refunds/calculate", Some(token), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_core::error::ErrorKind;

    #[test]
    fn upstream_error_prefers_backend_payload() {
        let body = r#"{
            "message": "Room is no longer available",
            "statusCode": 409,
            "timestamp": 0,
            "path": "",
            "errorCode": ""
        }"#;

        match HotelApiClient::upstream_error(409, body, "/bookings") {
            AppError::Upstream(payload) => {
                assert_eq!(payload.message, "Room is no longer available");
                assert_eq!(payload.status_code, 409);
                assert_eq!(payload.path, "/bookings");
                assert_eq!(payload.error_code, "HTTP_409");
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[test]
    fn upstream_error_synthesizes_payload_for_opaque_body() {
        match HotelApiClient::upstream_error(404, "not json", "/rooms/9") {
            AppError::Upstream(payload) => {
                assert_eq!(payload.status_code, 404);
                assert_eq!(payload.kind(), ErrorKind::NotFound);
                assert_eq!(payload.error_code, "HTTP_404");
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }
}
