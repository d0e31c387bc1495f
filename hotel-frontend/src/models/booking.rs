use super::room::Room;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A reservation record owned by the hotel backend.
///
/// Created unconfirmed by the front-end; the backend flips `isConfirmed`
/// once payment completes. `totalPrice` is fixed at creation and
/// authoritative over any client-side recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    #[serde(rename = "roomID")]
    pub room_id: i64,
    /// Embedded room snapshot; not every backend iteration includes it.
    #[serde(default)]
    pub room: Option<Room>,
    pub client_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_confirmed: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub total_price: f64,
    /// Direct payment reference, when the backend has one.
    #[serde(rename = "paymentID", default)]
    pub payment_id: Option<String>,
}

/// Payload for creating a booking. Always submitted unconfirmed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(rename = "roomID")]
    pub room_id: i64,
    pub client_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub total_price: f64,
}
