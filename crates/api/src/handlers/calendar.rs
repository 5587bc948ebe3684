use axum::{extract::State, Json};
use hallbook_core::{
    calendar,
    errors::VenueError,
    models::{
        booking::Booking,
        calendar::{PublicEvent, StaffCalendar},
    },
};
use std::sync::Arc;

use crate::{
    middleware::{error_handling::AppError, session::CurrentUser},
    ApiState,
};

async fn all_bookings(state: &ApiState) -> Result<Vec<Booking>, AppError> {
    let rows = hallbook_db::repositories::booking::list_all_bookings(&state.db_pool)
        .await
        .map_err(VenueError::Database)?;
    Ok(rows.into_iter().map(Booking::from).collect())
}

/// Staff calendar with day statuses and full event details.
#[axum::debug_handler]
pub async fn staff_calendar(
    State(state): State<Arc<ApiState>>,
    _user: CurrentUser,
) -> Result<Json<StaffCalendar>, AppError> {
    let bookings = all_bookings(&state).await?;
    Ok(Json(calendar::staff_calendar(&bookings)?))
}

/// Anonymous calendar: which dates are taken, nothing about who took them.
#[axum::debug_handler]
pub async fn public_calendar(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<PublicEvent>>, AppError> {
    let bookings = all_bookings(&state).await?;
    Ok(Json(calendar::public_calendar(&bookings)?))
}
