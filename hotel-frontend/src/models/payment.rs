use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How much of the booking total is captured up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOption {
    /// Full payment now.
    Prepaid,
    /// Half now, half at check-in.
    Partial,
    /// Pay at the hotel; a 15% deposit is charged now.
    Postpaid,
}

impl PaymentOption {
    /// Fraction of the booking total charged immediately.
    pub fn fraction(self) -> f64 {
        match self {
            PaymentOption::Prepaid => 1.0,
            PaymentOption::Partial => 0.5,
            PaymentOption::Postpaid => 0.15,
        }
    }

    /// Amount due now for a booking total. Unrounded; rounding is a display
    /// concern only.
    pub fn amount_due(self, total: f64) -> f64 {
        self.fraction() * total
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentOption::Prepaid => "Full payment",
            PaymentOption::Partial => "Partial payment (50%)",
            PaymentOption::Postpaid => "Pay at hotel (15% deposit)",
        }
    }
}

/// A monetary capture record associated with one booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "paymentID")]
    pub payment_id: String,
    #[serde(rename = "bookingID")]
    pub booking_id: i64,
    /// Full booking amount.
    pub amount: f64,
    /// Amount captured immediately; at most `amount`.
    pub amount_paid: f64,
    pub payment_type: PaymentOption,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(rename = "userID", default)]
    pub user_id: Option<String>,
}

/// Payload for creating a payment against a pending booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    #[serde(rename = "bookingID")]
    pub booking_id: i64,
    pub amount: f64,
    pub amount_paid: f64,
    pub payment_type: PaymentOption,
    pub payment_date: NaiveDate,
    pub card_number: String,
    #[serde(rename = "userID")]
    pub user_id: String,
}

/// Mask all but the last four characters of a card number for receipts.
///
/// Counted in characters, not bytes; the form accepts whatever the user
/// typed, including non-ASCII digits.
pub fn mask_card_number(card_number: &str) -> String {
    let total = card_number.chars().count();
    let masked = total.saturating_sub(4);
    card_number
        .chars()
        .enumerate()
        .map(|(i, c)| if i < masked { '*' } else { c })
        .collect()
}
