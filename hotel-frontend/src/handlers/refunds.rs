use askama::Template;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::AppState;
use crate::handlers::error::{PageError, on_page};
use crate::models::{AuthUser, Payment, RefundRequest};
use crate::services::pricing;

#[derive(Template)]
#[template(path = "refund_result.html")]
pub struct RefundResultTemplate {
    pub booking_id: i64,
    pub payment_id: String,
    /// Server-computed; displayed, never sent.
    pub amount_display: String,
    pub refund_date_display: String,
}

/// Request a refund for a booking's payment.
///
/// The payment is resolved from the booking's direct reference when it has
/// one, falling back to a lookup by booking id. The refund amount is always
/// computed by the backend.
pub async fn request_refund(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    user: AuthUser,
) -> Result<impl IntoResponse, PageError> {
    let path = format!("/my-bookings/{}/refund", booking_id);

    let booking = state
        .api
        .booking(&user.access_token, booking_id)
        .await
        .map_err(on_page(&path))?;

    let payment: Payment = match &booking.payment_id {
        Some(payment_id) => state
            .api
            .payment(&user.access_token, payment_id)
            .await
            .map_err(on_page(&path))?,
        None => state
            .api
            .payment_for_booking(&user.access_token, booking_id)
            .await
            .map_err(on_page(&path))?,
    };

    let request = RefundRequest {
        refund_id: None,
        payment_id: payment.payment_id.clone(),
        refund_date: Utc::now().date_naive(),
    };

    let refund = state
        .api
        .calculate_refund(&user.access_token, &request)
        .await
        .map_err(on_page(&path))?;

    tracing::info!(
        booking_id,
        payment_id = %refund.payment_id,
        amount = refund.amount,
        "refund recorded"
    );

    Ok(RefundResultTemplate {
        booking_id,
        payment_id: refund.payment_id.clone(),
        amount_display: pricing::format_amount(refund.amount),
        refund_date_display: refund.refund_date.format("%Y-%m-%d").to_string(),
    })
}
