use askama::Template;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::handlers::error::{PageError, on_page};
use crate::models::{AuthUser, mask_card_number};
use crate::services::{pricing, workflow::WorkflowState};

#[derive(Template)]
#[template(path = "confirmation.html")]
pub struct ConfirmationTemplate {
    pub payment_id: String,
    pub booking_id: i64,
    pub room_label: String,
    pub client_name: String,
    pub dates_display: String,
    pub stage: String,
    pub masked_card: String,
    pub payment_label: String,
    pub amount_paid_display: String,
    pub stay_summary: String,
    pub subtotal_display: String,
    pub taxes_display: String,
    pub fee_display: String,
    /// The backend's booking total, echoed verbatim.
    pub total_display: String,
}

/// Receipt view: payment first, then the booking it belongs to.
pub async fn confirmation(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
    user: AuthUser,
) -> Result<impl IntoResponse, PageError> {
    let path = format!("/confirmation/{}", payment_id);

    let payment = state
        .api
        .payment(&user.access_token, &payment_id)
        .await
        .map_err(on_page(&path))?;
    let booking = state
        .api
        .booking(&user.access_token, payment.booking_id)
        .await
        .map_err(on_page(&path))?;

    let nights = pricing::nights(booking.start_date, booking.end_date).max(1);
    // Rate from the embedded room when present, otherwise derived from the
    // fixed total so the breakdown still adds up.
    let rate = booking
        .room
        .as_ref()
        .map(|room| room.price_per_night)
        .unwrap_or(booking.total_price / nights as f64);
    let breakdown = pricing::breakdown(rate, nights, booking.total_price);

    let room_label = booking
        .room
        .as_ref()
        .map(|room| format!("Room {} ({})", room.room_number, room.room_type))
        .unwrap_or_else(|| format!("Room #{}", booking.room_id));

    Ok(ConfirmationTemplate {
        payment_id: payment.payment_id.clone(),
        booking_id: booking.id,
        room_label,
        client_name: booking.client_name.clone(),
        dates_display: format!(
            "{} to {}",
            booking.start_date.format("%Y-%m-%d"),
            booking.end_date.format("%Y-%m-%d")
        ),
        stage: WorkflowState::of(&booking, Some(&payment), None).to_string(),
        masked_card: payment
            .card_number
            .as_deref()
            .map(mask_card_number)
            .unwrap_or_default(),
        payment_label: payment.payment_type.label().to_string(),
        amount_paid_display: pricing::format_amount(payment.amount_paid),
        stay_summary: if nights == 1 {
            "1 night".to_string()
        } else {
            format!("{} nights", nights)
        },
        subtotal_display: pricing::format_amount(breakdown.room_subtotal),
        taxes_display: pricing::format_amount(breakdown.taxes),
        fee_display: pricing::format_amount(breakdown.service_fee),
        total_display: pricing::format_amount(breakdown.total),
    })
}

/// Stream the backend's PDF receipt through unchanged.
pub async fn download_receipt(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    user: AuthUser,
) -> Result<Response, PageError> {
    let path = format!("/bookings/{}/receipt", booking_id);
    let upstream = state
        .api
        .booking_report(&user.access_token, booking_id)
        .await
        .map_err(on_page(&path))?;

    let mut headers = HeaderMap::new();
    if let Some(content_type) = upstream.headers().get(header::CONTENT_TYPE) {
        headers.insert(header::CONTENT_TYPE, content_type.clone());
    }
    if let Some(disposition) = upstream.headers().get(header::CONTENT_DISPOSITION) {
        headers.insert(header::CONTENT_DISPOSITION, disposition.clone());
    } else {
        let fallback = format!("attachment; filename=\"booking-{}.pdf\"", booking_id);
        if let Ok(value) = fallback.parse() {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
    }

    let body = upstream
        .bytes()
        .await
        .map_err(|e| PageError::new(e.into(), &path))?;

    Ok((StatusCode::OK, headers, body).into_response())
}
