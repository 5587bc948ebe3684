use axum::{extract::State, Json};
use hallbook_core::{errors::VenueError, models::audit::AuditEntry};
use std::sync::Arc;

use crate::{
    middleware::{error_handling::AppError, session::CurrentUser},
    ApiState,
};

/// Most entries returned by the audit log view.
pub const AUDIT_LOG_LIMIT: i64 = 500;

/// Appends an entry to the audit log.
pub(crate) async fn record(
    state: &ApiState,
    action: String,
    username: Option<&str>,
) -> Result<(), AppError> {
    hallbook_db::repositories::audit::log_action(&state.db_pool, &action, username)
        .await
        .map_err(VenueError::Database)?;
    Ok(())
}

#[axum::debug_handler]
pub async fn list_audit_log(
    State(state): State<Arc<ApiState>>,
    user: CurrentUser,
) -> Result<Json<Vec<AuditEntry>>, AppError> {
    user.require_admin("You don't have permission to view audit logs.")?;

    let entries = hallbook_db::repositories::audit::list_recent(&state.db_pool, AUDIT_LOG_LIMIT)
        .await
        .map_err(VenueError::Database)?;

    Ok(Json(entries.into_iter().map(AuditEntry::from).collect()))
}
