use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/calendar", get(handlers::calendar::staff_calendar))
        .route(
            "/api/public/calendar",
            get(handlers::calendar::public_calendar),
        )
}
