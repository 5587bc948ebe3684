//! # Account Handlers
//!
//! Login and logout for staff, and the administrator's account management:
//! changing the admin password and creating or removing staff accounts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hallbook_core::{
    errors::VenueError,
    models::user::{
        ChangePasswordRequest, CreateStaffRequest, LoginRequest, LoginResponse, LogoutResponse,
        StaffResponse, User, MAX_USERNAME_LEN,
    },
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    handlers::audit,
    middleware::{auth, error_handling::AppError, session::CurrentUser},
    ApiState,
};

const ADMIN_ONLY: &str = "Access denied.";

fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError(VenueError::Validation(format!("{} is required", field))));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = auth::verify_credentials(&state.db_pool, &payload.username, &payload.password)
        .await
        .map_err(VenueError::Database)?;

    let Some(user) = user else {
        warn!("Failed login attempt for '{}'", payload.username);
        return Err(AppError(VenueError::Authentication(
            "Invalid credentials".to_string(),
        )));
    };

    let token = state.sessions.create(&user.username).await;
    audit::record(
        &state,
        format!("User {} logged in", user.username),
        Some(user.username.as_str()),
    )
    .await?;

    Ok(Json(LoginResponse {
        token: token.to_string(),
        is_admin: user.username == state.admin_username,
        username: user.username,
    }))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    user: CurrentUser,
) -> Result<Json<LogoutResponse>, AppError> {
    state.sessions.revoke(user.token).await;
    audit::record(
        &state,
        format!("User {} logged out", user.username),
        Some(user.username.as_str()),
    )
    .await?;

    Ok(Json(LogoutResponse {
        username: user.username,
    }))
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    user: CurrentUser,
) -> Result<Json<Vec<User>>, AppError> {
    user.require_admin(ADMIN_ONLY)?;

    let users = hallbook_db::repositories::user::list_users(&state.db_pool)
        .await
        .map_err(VenueError::Database)?;

    Ok(Json(users.into_iter().map(User::from).collect()))
}

#[axum::debug_handler]
pub async fn change_admin_password(
    State(state): State<Arc<ApiState>>,
    user: CurrentUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<StaffResponse>, AppError> {
    user.require_admin(ADMIN_ONLY)?;
    require_non_empty(&payload.new_password, "New password")?;

    let password_hash = auth::hash_password(&payload.new_password)?;
    let updated = hallbook_db::repositories::user::update_password(
        &state.db_pool,
        &state.admin_username,
        &password_hash,
    )
    .await
    .map_err(VenueError::Database)?;

    if !updated {
        return Err(AppError(VenueError::NotFound(format!(
            "User {} not found",
            state.admin_username
        ))));
    }

    info!("Administrator password changed");
    Ok(Json(StaffResponse {
        username: state.admin_username.clone(),
        message: "Admin password updated.".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn create_staff(
    State(state): State<Arc<ApiState>>,
    user: CurrentUser,
    Json(payload): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<StaffResponse>), AppError> {
    user.require_admin(ADMIN_ONLY)?;
    let username = payload.username.trim();
    require_non_empty(username, "Username")?;
    require_non_empty(&payload.password, "Password")?;
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError(VenueError::Validation(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LEN
        ))));
    }

    let existing = hallbook_db::repositories::user::get_user_by_username(&state.db_pool, username)
        .await
        .map_err(VenueError::Database)?;
    if existing.is_some() {
        return Err(AppError(VenueError::Conflict(
            "Username already exists.".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password)?;
    hallbook_db::repositories::user::create_user(&state.db_pool, username, &password_hash)
        .await
        .map_err(VenueError::Database)?;

    info!("Staff account '{}' created by {}", username, user.username);
    Ok((
        StatusCode::CREATED,
        Json(StaffResponse {
            username: username.to_string(),
            message: format!("Staff '{}' created.", username),
        }),
    ))
}

#[axum::debug_handler]
pub async fn delete_staff(
    State(state): State<Arc<ApiState>>,
    user: CurrentUser,
    Path(username): Path<String>,
) -> Result<Json<StaffResponse>, AppError> {
    user.require_admin(ADMIN_ONLY)?;

    let cannot_delete =
        || AppError(VenueError::Validation("Cannot delete admin or invalid user.".to_string()));

    if username == state.admin_username {
        return Err(cannot_delete());
    }

    let deleted = hallbook_db::repositories::user::delete_user(&state.db_pool, &username)
        .await
        .map_err(VenueError::Database)?;
    if !deleted {
        return Err(cannot_delete());
    }

    let revoked = state.sessions.revoke_user(&username).await;
    info!(
        "Staff account '{}' deleted by {} ({} sessions ended)",
        username, user.username, revoked
    );

    Ok(Json(StaffResponse {
        message: format!("Staff '{}' deleted.", username),
        username,
    }))
}
