use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::AppState;
use crate::handlers::error::{PageError, on_page};
use crate::models::Room;
use crate::services::pricing;

/// Search parameters, all optional. Kept as strings so empty form fields
/// round-trip instead of failing deserialization.
#[derive(Deserialize, Default, Clone)]
pub struct RoomsQuery {
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    #[serde(default)]
    pub guests: String,
    #[serde(default)]
    pub room_type: String,
    #[serde(default)]
    pub max_price: String,
}

impl RoomsQuery {
    fn check_in_date(&self) -> Option<NaiveDate> {
        parse_date(&self.check_in)
    }

    fn check_out_date(&self) -> Option<NaiveDate> {
        parse_date(&self.check_out)
    }

    fn guest_count(&self) -> Option<u32> {
        self.guests.trim().parse().ok()
    }

    fn price_ceiling(&self) -> Option<f64> {
        self.max_price.trim().parse().ok()
    }

    /// Whole nights for the requested stay, when both dates are present and
    /// ordered.
    fn nights(&self) -> Option<i64> {
        let (check_in, check_out) = (self.check_in_date()?, self.check_out_date()?);
        let span = pricing::nights(check_in, check_out);
        (span > 0).then_some(span)
    }

    fn matches(&self, room: &Room) -> bool {
        if !room.available {
            return false;
        }
        if let Some(guests) = self.guest_count() {
            if room.capacity < guests {
                return false;
            }
        }
        if let Some(ceiling) = self.price_ceiling() {
            if room.price_per_night > ceiling {
                return false;
            }
        }
        let wanted_type = self.room_type.trim();
        if !wanted_type.is_empty() && !room.room_type.eq_ignore_ascii_case(wanted_type) {
            return false;
        }
        true
    }

    /// Query string carried on the details/booking links, percent-encoded so
    /// user-typed values cannot break the URL.
    fn query_string(&self) -> String {
        serde_urlencoded::to_string([
            ("check_in", self.check_in.as_str()),
            ("check_out", self.check_out.as_str()),
            ("guests", self.guests.as_str()),
        ])
        .unwrap_or_default()
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Display-ready room row. Amounts are formatted up front so the template
/// stays free of arithmetic.
pub struct RoomView {
    pub id: i64,
    pub room_number: String,
    pub room_type: String,
    pub description: String,
    pub capacity: u32,
    pub available: bool,
    pub rate_display: String,
    pub amenities: String,
    /// Stay total preview, empty when no valid dates were supplied.
    pub stay_total: String,
}

impl RoomView {
    pub fn from_room(room: &Room, nights: Option<i64>) -> Self {
        let stay_total = nights
            .map(|n| pricing::format_amount(pricing::total_price(room.price_per_night, n)))
            .unwrap_or_default();

        Self {
            id: room.id,
            room_number: room.room_number.clone(),
            room_type: room.room_type.clone(),
            description: room.description.clone(),
            capacity: room.capacity,
            available: room.available,
            rate_display: pricing::format_amount(room.price_per_night),
            amenities: room.amenities.join(", "),
            stay_total,
        }
    }
}

#[derive(Template)]
#[template(path = "rooms.html")]
pub struct RoomsTemplate {
    pub rooms: Vec<RoomView>,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub room_type: String,
    pub max_price: String,
    /// e.g. "3 nights", empty when dates are absent.
    pub stay_summary: String,
    pub booking_query: String,
}

pub async fn search_rooms(
    State(state): State<AppState>,
    Query(query): Query<RoomsQuery>,
) -> Result<impl IntoResponse, PageError> {
    let rooms = state.api.list_rooms().await.map_err(on_page("/rooms"))?;
    let nights = query.nights();

    let rooms: Vec<RoomView> = rooms
        .iter()
        .filter(|room| query.matches(room))
        .map(|room| RoomView::from_room(room, nights))
        .collect();

    tracing::debug!(matches = rooms.len(), "room search");

    Ok(RoomsTemplate {
        rooms,
        stay_summary: stay_summary(nights),
        booking_query: query.query_string(),
        check_in: query.check_in,
        check_out: query.check_out,
        guests: query.guests,
        room_type: query.room_type,
        max_price: query.max_price,
    })
}

#[derive(Template)]
#[template(path = "room_details.html")]
pub struct RoomDetailsTemplate {
    pub room: RoomView,
    pub stay_summary: String,
    pub booking_query: String,
}

pub async fn room_details(
    State(state): State<AppState>,
    Path(room_id): Path<i64>,
    Query(query): Query<RoomsQuery>,
) -> Result<impl IntoResponse, PageError> {
    let path = format!("/rooms/{}", room_id);
    let room = state.api.room(room_id).await.map_err(on_page(&path))?;
    let nights = query.nights();

    Ok(RoomDetailsTemplate {
        room: RoomView::from_room(&room, nights),
        stay_summary: stay_summary(nights),
        booking_query: query.query_string(),
    })
}

fn stay_summary(nights: Option<i64>) -> String {
    match nights {
        Some(1) => "1 night".to_string(),
        Some(n) => format!("{} nights", n),
        None => String::new(),
    }
}
