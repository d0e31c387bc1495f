//! Derived pricing math for the booking views.
//!
//! All amounts here are advisory previews. The backend's `totalPrice` on a
//! booking is authoritative once the booking exists; the breakdown below is
//! rendered alongside it, never in place of it.

use chrono::NaiveDate;
use hotel_core::error::AppError;

/// Flat tax applied to the room subtotal on receipts.
pub const TAX_RATE: f64 = 0.15;

/// Fixed per-booking service fee on receipts.
pub const SERVICE_FEE: f64 = 25.0;

/// Whole nights between check-in and check-out.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Reject stays that do not span at least one night. Advisory only; the
/// backend enforces its own date rules.
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<i64, AppError> {
    let span = nights(check_in, check_out);
    if span <= 0 {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "check-out date must be after check-in date"
        )));
    }
    Ok(span)
}

/// Booking total fixed at creation time.
pub fn total_price(rate_per_night: f64, nights: i64) -> f64 {
    rate_per_night * nights as f64
}

/// Round to cents. Display only; wire amounts stay unrounded.
pub fn round_display(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Receipt line items derived from the room rate and stay length.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub nights: i64,
    pub room_subtotal: f64,
    pub taxes: f64,
    pub service_fee: f64,
    /// The backend's figure, echoed verbatim.
    pub total: f64,
}

pub fn breakdown(rate_per_night: f64, nights: i64, backend_total: f64) -> PriceBreakdown {
    let room_subtotal = total_price(rate_per_night, nights);
    PriceBreakdown {
        nights,
        room_subtotal,
        taxes: room_subtotal * TAX_RATE,
        service_fee: SERVICE_FEE,
        total: backend_total,
    }
}
