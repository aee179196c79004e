use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::store::{Booking, BookingStatus, NewBooking};
use crate::validation::sanitize_input;
use crate::AppState;

use super::{parse_id, AppError};

// ─── POST /api/bookings ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(alias = "userId")]
    pub user_id: u64,
    #[serde(alias = "serviceId")]
    pub service_id: u64,
    #[serde(default)]
    pub location: String,
    #[serde(alias = "bookingDate")]
    pub booking_date: String,
    #[serde(default, alias = "timeSlot")]
    pub time_slot: String,
    #[serde(alias = "durationHours")]
    pub duration_hours: u32,
    #[serde(default, alias = "customNeeds")]
    pub custom_needs: Option<String>,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if state.store.user(req.user_id).is_none() {
        return Err(AppError::NotFound("User not found".into()));
    }
    let service = state
        .store
        .service(req.service_id)
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

    let location = sanitize_input(&req.location);
    if location.is_empty() {
        return Err(AppError::BadRequest("Location is required".into()));
    }
    let booking_date = NaiveDate::parse_from_str(&req.booking_date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("booking_date must be YYYY-MM-DD".into()))?;
    let time_slot = sanitize_input(&req.time_slot);
    if time_slot.is_empty() {
        return Err(AppError::BadRequest("Time slot is required".into()));
    }
    if req.duration_hours == 0 {
        return Err(AppError::BadRequest(
            "duration_hours must be at least 1".into(),
        ));
    }

    let total_cost = service.price_per_hour * f64::from(req.duration_hours);
    let booking = state.store.create_booking(NewBooking {
        user_id: req.user_id,
        service_id: req.service_id,
        location,
        booking_date,
        time_slot,
        duration_hours: req.duration_hours,
        total_cost,
        custom_needs: req.custom_needs.map(|n| sanitize_input(&n)),
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": booking })),
    ))
}

// ─── GET /api/bookings ───────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    #[serde(alias = "userId")]
    pub user_id: Option<String>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = match query.user_id.as_deref() {
        Some(raw) => state.store.bookings_for_user(parse_id(raw, "user")?),
        None => state.store.bookings(),
    };
    Ok(Json(bookings))
}

// ─── GET /api/bookings/:id ───────────────────────────────────────

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = parse_id(&id, "booking")?;
    let booking = state
        .store
        .booking(id)
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

// ─── PUT /api/bookings/:id ───────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateBookingRequest {
    pub status: Option<String>,
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let id = parse_id(&id, "booking")?;
    let raw = req
        .status
        .ok_or_else(|| AppError::BadRequest("Status is required".into()))?;
    let status = BookingStatus::parse(&raw).ok_or_else(|| {
        AppError::BadRequest(
            "Status must be one of pending, confirmed, cancelled, completed".into(),
        )
    })?;

    let booking = state
        .store
        .update_booking_status(id, status)
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

// ─── DELETE /api/bookings/:id ────────────────────────────────────
// Soft delete: a removed booking is a cancelled booking.

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id, "booking")?;
    let booking = state
        .store
        .update_booking_status(id, BookingStatus::Cancelled)
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Booking cancelled successfully",
        "data": booking,
    })))
}
