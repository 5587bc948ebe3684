//! # Booking Handlers
//!
//! Create, edit, delete and look up bookings. Create and edit share one path
//! through [`conflict::find_conflict`]: the stored bookings whose dates can
//! intersect the request are loaded (minus the booking being edited), checked,
//! and only then is the row written. The load-check-write sequence runs under
//! [`ApiState::booking_lock`] so two requests in this process cannot both pass
//! the check and double-book the hall.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use hallbook_core::{
    conflict,
    errors::VenueError,
    models::{
        booking::{
            Booking, BookingDetail, BookingRequest, BookingSummary, DeleteBookingResponse,
            NewBooking,
        },
        receipt::Receipt,
    },
    receipt, time_of_day,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    handlers::audit,
    middleware::{error_handling::AppError, session::CurrentUser},
    ApiState,
};

/// Message returned when a booking clashes with one already on record.
pub const OVERLAP_MESSAGE: &str = "This booking overlaps with another booking!";

/// Spacing of the selectable start and end times.
pub const SLOT_INTERVAL_MINUTES: u16 = 30;

#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// Only bookings whose date range contains this `YYYY-MM-DD` date
    pub date: Option<String>,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn not_found(id: i64) -> VenueError {
    VenueError::NotFound(format!("Booking with ID {} not found", id))
}

/// Fails with 409 when `candidate` clashes with one of `existing`.
///
/// `existing` is whatever the store returned for the candidate's date range,
/// already without the booking being edited.
pub fn reject_conflict(candidate: &NewBooking, existing: &[Booking]) -> Result<(), AppError> {
    if let Some(clash) = conflict::find_conflict(candidate, existing)? {
        warn!(
            "Rejected booking {} {} - {} {}: overlaps booking {}",
            candidate.from_date, candidate.from_time, candidate.to_date, candidate.to_time, clash.id
        );
        return Err(AppError(VenueError::Conflict(OVERLAP_MESSAGE.to_string())));
    }

    Ok(())
}

/// Rejects `candidate` if it clashes with any stored booking other than
/// `exclude_id`.
async fn ensure_available(
    state: &ApiState,
    candidate: &NewBooking,
    exclude_id: Option<i64>,
) -> Result<(), AppError> {
    let existing: Vec<Booking> = hallbook_db::repositories::booking::find_bookings_in_range(
        &state.db_pool,
        candidate.from_date,
        candidate.to_date,
        exclude_id,
    )
    .await
    .map_err(VenueError::Database)?
    .into_iter()
    .map(Booking::from)
    .collect();

    reject_conflict(candidate, &existing)
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    user: CurrentUser,
    Json(payload): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let candidate = payload.validate()?;

    let created = {
        let _guard = state.booking_lock.lock().await;
        ensure_available(&state, &candidate, None).await?;

        hallbook_db::repositories::booking::create_booking(&state.db_pool, &candidate)
            .await
            .map_err(VenueError::Database)?
    };

    info!("Booking {} created by {}", created.id, user.username);
    audit::record(
        &state,
        format!(
            "Booking created by {}: {} {} {} {} {}",
            user.username,
            created.name,
            created.from_date,
            created.from_time,
            created.to_date,
            created.to_time
        ),
        Some(user.username.as_str()),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(Booking::from(created))))
}

#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<Arc<ApiState>>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let candidate = payload.validate()?;

    let updated = {
        let _guard = state.booking_lock.lock().await;

        hallbook_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
            .await
            .map_err(VenueError::Database)?
            .ok_or_else(|| not_found(id))?;

        ensure_available(&state, &candidate, Some(id)).await?;

        hallbook_db::repositories::booking::update_booking(&state.db_pool, id, &candidate)
            .await
            .map_err(VenueError::Database)?
            .ok_or_else(|| not_found(id))?
    };

    info!("Booking {} updated by {}", id, user.username);
    audit::record(
        &state,
        format!("Booking {} updated by {}", id, user.username),
        Some(user.username.as_str()),
    )
    .await?;

    Ok(Json(Booking::from(updated)))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteBookingResponse>, AppError> {
    let deleted = hallbook_db::repositories::booking::delete_booking(&state.db_pool, id)
        .await
        .map_err(VenueError::Database)?;

    if !deleted {
        return Err(AppError(not_found(id)));
    }

    info!("Booking {} deleted by {}", id, user.username);
    audit::record(
        &state,
        format!("Booking {} deleted by {}", id, user.username),
        Some(user.username.as_str()),
    )
    .await?;

    Ok(Json(DeleteBookingResponse { id, deleted }))
}

/// Dashboard listing. A `date` that is not a valid `YYYY-MM-DD` value is
/// ignored and every booking is returned.
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    _user: CurrentUser,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let on_date = query.date.as_deref().and_then(parse_date);

    let bookings = hallbook_db::repositories::booking::list_bookings(&state.db_pool, on_date)
        .await
        .map_err(VenueError::Database)?;

    Ok(Json(bookings.into_iter().map(Booking::from).collect()))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<BookingDetail>, AppError> {
    let booking = hallbook_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(VenueError::Database)?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(BookingDetail::from(Booking::from(booking))))
}

/// Bookings occupying one date. An invalid date yields an empty list.
#[axum::debug_handler]
pub async fn bookings_on_date(
    State(state): State<Arc<ApiState>>,
    _user: CurrentUser,
    Path(date): Path<String>,
) -> Result<Json<Vec<BookingSummary>>, AppError> {
    let Some(date) = parse_date(&date) else {
        return Ok(Json(Vec::new()));
    };

    let bookings = hallbook_db::repositories::booking::list_bookings(&state.db_pool, Some(date))
        .await
        .map_err(VenueError::Database)?;

    Ok(Json(
        bookings
            .into_iter()
            .map(|row| BookingSummary::from(Booking::from(row)))
            .collect(),
    ))
}

#[axum::debug_handler]
pub async fn booking_receipt(
    State(state): State<Arc<ApiState>>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Receipt>, AppError> {
    let booking = hallbook_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(VenueError::Database)?
        .ok_or_else(|| not_found(id))?;

    let receipt = receipt::compose(
        &Booking::from(booking),
        &state.venue,
        Utc::now().date_naive(),
    );

    Ok(Json(receipt))
}

/// Start and end times offered by the booking form.
pub async fn time_slots() -> Json<Vec<String>> {
    Json(time_of_day::time_slots(SLOT_INTERVAL_MINUTES))
}
