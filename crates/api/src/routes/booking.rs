use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            post(handlers::booking::create_booking).get(handlers::booking::list_bookings),
        )
        .route(
            "/api/bookings/:id",
            get(handlers::booking::get_booking)
                .put(handlers::booking::update_booking)
                .delete(handlers::booking::delete_booking),
        )
        .route(
            "/api/bookings/:id/receipt",
            get(handlers::booking::booking_receipt),
        )
        .route(
            "/api/bookings/date/:date",
            get(handlers::booking::bookings_on_date),
        )
        .route("/api/time-slots", get(handlers::booking::time_slots))
}
