use serde::{Deserialize, Serialize};

/// A room as owned and served by the hotel backend. Read-only on this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub price_per_night: f64,
    pub capacity: u32,
    pub available: bool,
    #[serde(default)]
    pub description: String,
    pub room_type: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}
