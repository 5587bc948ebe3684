use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/login", post(handlers::account::login))
        .route("/api/logout", post(handlers::account::logout))
        .route("/api/audit", get(handlers::audit::list_audit_log))
        .route("/api/admin/users", get(handlers::account::list_users))
        .route(
            "/api/admin/password",
            put(handlers::account::change_admin_password),
        )
        .route("/api/admin/staff", post(handlers::account::create_staff))
        .route(
            "/api/admin/staff/:username",
            delete(handlers::account::delete_staff),
        )
}
