use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::AppState;
use crate::handlers::error::{PageError, on_page};
use crate::handlers::rooms::RoomView;
use crate::models::{AuthUser, Booking, NewBooking, Room};
use crate::services::{pricing, workflow::WorkflowState};

#[derive(Template)]
#[template(path = "booking_form.html")]
pub struct BookingFormTemplate {
    pub room: RoomView,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub notes: String,
    /// e.g. "3 nights", empty until both dates are valid.
    pub stay_summary: String,
    pub total_display: String,
    pub error: String,
}

#[derive(Deserialize, Default)]
pub struct BookingQuery {
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    #[serde(default)]
    pub guests: String,
}

#[derive(Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    #[serde(default)]
    pub guests: String,
    #[serde(default)]
    pub notes: String,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn form_template(room: &Room, form: &BookingForm, error: String) -> BookingFormTemplate {
    let stay = parse_date(&form.check_in)
        .zip(parse_date(&form.check_out))
        .map(|(check_in, check_out)| pricing::nights(check_in, check_out))
        .filter(|nights| *nights > 0);

    BookingFormTemplate {
        room: RoomView::from_room(room, stay),
        check_in: form.check_in.clone(),
        check_out: form.check_out.clone(),
        guests: form.guests.clone(),
        notes: form.notes.clone(),
        stay_summary: match stay {
            Some(1) => "1 night".to_string(),
            Some(n) => format!("{} nights", n),
            None => String::new(),
        },
        total_display: stay
            .map(|n| pricing::format_amount(pricing::total_price(room.price_per_night, n)))
            .unwrap_or_default(),
        error,
    }
}

pub async fn booking_form(
    State(state): State<AppState>,
    Path(room_id): Path<i64>,
    _user: AuthUser,
    Query(query): Query<BookingQuery>,
) -> Result<impl IntoResponse, PageError> {
    let path = format!("/booking/{}", room_id);
    let room = state.api.room(room_id).await.map_err(on_page(&path))?;

    let form = BookingForm {
        check_in: query.check_in,
        check_out: query.check_out,
        guests: query.guests,
        notes: String::new(),
    };
    Ok(form_template(&room, &form, String::new()))
}

pub async fn create_booking(
    State(state): State<AppState>,
    Path(room_id): Path<i64>,
    user: AuthUser,
    Form(form): Form<BookingForm>,
) -> Result<Response, PageError> {
    let path = format!("/booking/{}", room_id);
    let room = state.api.room(room_id).await.map_err(on_page(&path))?;

    let (check_in, check_out) = match parse_date(&form.check_in).zip(parse_date(&form.check_out)) {
        Some(dates) => dates,
        None => {
            return Ok(form_template(
                &room,
                &form,
                "Enter valid check-in and check-out dates".to_string(),
            )
            .into_response());
        }
    };

    let nights = match pricing::validate_stay(check_in, check_out) {
        Ok(nights) => nights,
        Err(_) => {
            return Ok(form_template(
                &room,
                &form,
                "Check-out date must be after check-in date".to_string(),
            )
            .into_response());
        }
    };

    // Advisory only; the backend owns availability and capacity rules.
    if let Ok(guests) = form.guests.trim().parse::<u32>() {
        if guests > room.capacity {
            return Ok(form_template(
                &room,
                &form,
                format!("This room sleeps at most {} guests", room.capacity),
            )
            .into_response());
        }
    }

    let client_name = match state.api.current_user(&user.access_token).await {
        Ok(profile) => profile.complete_name,
        Err(error) => {
            tracing::warn!(user_id = %user.user_id, "profile fetch failed, using email: {}", error);
            user.email.clone()
        }
    };

    let notes = form.notes.trim();
    let payload = NewBooking {
        room_id,
        client_name,
        start_date: check_in,
        end_date: check_out,
        is_confirmed: false,
        notes: (!notes.is_empty()).then(|| notes.to_string()),
        total_price: pricing::total_price(room.price_per_night, nights),
    };

    match state.api.create_booking(&user.access_token, &payload).await {
        Ok(booking) => {
            tracing::info!(booking_id = booking.id, room_id, "booking created");
            Ok(Redirect::to(&format!("/payment/{}", booking.id)).into_response())
        }
        Err(error) => {
            let message = error.to_error_message(&path).message;
            tracing::warn!(room_id, "booking creation failed: {}", message);
            Ok(form_template(&room, &form, message).into_response())
        }
    }
}

/// Display-ready row for the bookings list.
pub struct BookingRow {
    pub id: i64,
    pub room_label: String,
    pub dates_display: String,
    pub total_display: String,
    pub stage: String,
    pub is_confirmed: bool,
}

impl BookingRow {
    fn from_booking(booking: &Booking) -> Self {
        let room_label = booking
            .room
            .as_ref()
            .map(|room| format!("Room {} ({})", room.room_number, room.room_type))
            .unwrap_or_else(|| format!("Room #{}", booking.room_id));

        Self {
            id: booking.id,
            room_label,
            dates_display: format!(
                "{} to {}",
                booking.start_date.format("%Y-%m-%d"),
                booking.end_date.format("%Y-%m-%d")
            ),
            total_display: pricing::format_amount(booking.total_price),
            stage: WorkflowState::of(booking, None, None).to_string(),
            is_confirmed: booking.is_confirmed,
        }
    }
}

#[derive(Template)]
#[template(path = "my_bookings.html")]
pub struct MyBookingsTemplate {
    pub bookings: Vec<BookingRow>,
}

pub async fn my_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, PageError> {
    let bookings = state
        .api
        .bookings_for_user(&user.access_token, &user.user_id)
        .await
        .map_err(on_page("/my-bookings"))?;

    Ok(MyBookingsTemplate {
        bookings: bookings.iter().map(BookingRow::from_booking).collect(),
    })
}
