use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::AppState;
use crate::handlers::error::{PageError, on_page};
use crate::models::{AuthUser, Booking, NewPayment, PaymentOption};
use crate::services::pricing;

#[derive(Template)]
#[template(path = "payment.html")]
pub struct PaymentTemplate {
    pub booking_id: i64,
    pub room_label: String,
    pub dates_display: String,
    pub total_display: String,
    pub prepaid_due: String,
    pub partial_due: String,
    pub postpaid_due: String,
    pub error: String,
}

impl PaymentTemplate {
    fn for_booking(booking: &Booking, error: String) -> Self {
        let total = booking.total_price;
        Self {
            booking_id: booking.id,
            room_label: booking
                .room
                .as_ref()
                .map(|room| format!("Room {}", room.room_number))
                .unwrap_or_else(|| format!("Room #{}", booking.room_id)),
            dates_display: format!(
                "{} to {}",
                booking.start_date.format("%Y-%m-%d"),
                booking.end_date.format("%Y-%m-%d")
            ),
            total_display: pricing::format_amount(total),
            prepaid_due: pricing::format_amount(PaymentOption::Prepaid.amount_due(total)),
            partial_due: pricing::format_amount(PaymentOption::Partial.amount_due(total)),
            postpaid_due: pricing::format_amount(PaymentOption::Postpaid.amount_due(total)),
            error,
        }
    }
}

/// Card capture form. Demo capture only: required-field validation, no
/// gateway behind it.
#[derive(Deserialize, Validate)]
pub struct PaymentForm {
    pub payment_type: PaymentOption,
    #[validate(length(min = 12, max = 19, message = "Enter a valid card number"))]
    pub card_number: String,
    #[validate(length(min = 4, message = "Enter the card expiry date"))]
    pub expiry_date: String,
    #[validate(length(min = 3, max = 4, message = "Enter the card security code"))]
    pub cvv: String,
    #[validate(length(min = 1, message = "Enter the cardholder name"))]
    pub cardholder_name: String,
}

pub async fn payment_page(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    user: AuthUser,
) -> Result<Response, PageError> {
    let path = format!("/payment/{}", booking_id);
    let booking = state
        .api
        .booking(&user.access_token, booking_id)
        .await
        .map_err(on_page(&path))?;

    // An already-paid booking has nothing to capture.
    if booking.is_confirmed {
        let target = match &booking.payment_id {
            Some(payment_id) => format!("/confirmation/{}", payment_id),
            None => "/my-bookings".to_string(),
        };
        return Ok(Redirect::to(&target).into_response());
    }

    Ok(PaymentTemplate::for_booking(&booking, String::new()).into_response())
}

pub async fn submit_payment(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    user: AuthUser,
    Form(form): Form<PaymentForm>,
) -> Result<Response, PageError> {
    let path = format!("/payment/{}", booking_id);
    let booking = state
        .api
        .booking(&user.access_token, booking_id)
        .await
        .map_err(on_page(&path))?;

    if let Err(errors) = form.validate() {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .filter_map(|error| error.message.as_ref())
            .map(|message| message.to_string())
            .next()
            .unwrap_or_else(|| "Invalid card details".to_string());
        return Ok(PaymentTemplate::for_booking(&booking, message).into_response());
    }

    let payload = NewPayment {
        booking_id,
        amount: booking.total_price,
        amount_paid: form.payment_type.amount_due(booking.total_price),
        payment_type: form.payment_type,
        payment_date: Utc::now().date_naive(),
        card_number: form.card_number.trim().to_string(),
        user_id: user.user_id.clone(),
    };

    match state.api.create_payment(&user.access_token, &payload).await {
        Ok(payment) => {
            tracing::info!(
                booking_id,
                payment_id = %payment.payment_id,
                payment_type = ?payload.payment_type,
                "payment captured"
            );
            Ok(Redirect::to(&format!("/confirmation/{}", payment.payment_id)).into_response())
        }
        Err(error) => {
            let message = error.to_error_message(&path).message;
            tracing::warn!(booking_id, "payment failed: {}", message);
            Ok(PaymentTemplate::for_booking(&booking, message).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booking() -> Booking {
        Booking {
            id: 42,
            room_id: 5,
            room: None,
            client_name: "Ada Lovelace".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            is_confirmed: false,
            notes: None,
            created_at: None,
            total_price: 450.0,
            payment_id: None,
        }
    }

    #[test]
    fn template_offers_all_three_amounts() {
        let template = PaymentTemplate::for_booking(&booking(), String::new());
        assert_eq!(template.total_display, "450.00");
        assert_eq!(template.prepaid_due, "450.00");
        assert_eq!(template.partial_due, "225.00");
        assert_eq!(template.postpaid_due, "67.50");
    }

    #[test]
    fn card_fields_are_required() {
        let form = PaymentForm {
            payment_type: PaymentOption::Prepaid,
            card_number: String::new(),
            expiry_date: "12/28".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Ada Lovelace".to_string(),
        };
        assert!(form.validate().is_err());

        let form = PaymentForm {
            card_number: "4111111111111111".to_string(),
            ..form
        };
        assert!(form.validate().is_ok());
    }
}
