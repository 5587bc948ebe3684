//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! handler reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hallbook_core::errors::VenueError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `VenueError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use hallbook_api::middleware::error_handling::AppError;
/// use hallbook_core::errors::VenueError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(VenueError::NotFound("Booking 7 not found".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub VenueError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            VenueError::NotFound(_) => StatusCode::NOT_FOUND,
            VenueError::Validation(_) => StatusCode::BAD_REQUEST,
            VenueError::Parse(_) => StatusCode::BAD_REQUEST,
            VenueError::Conflict(_) => StatusCode::CONFLICT,
            VenueError::Authentication(_) => StatusCode::UNAUTHORIZED,
            VenueError::Authorization(_) => StatusCode::FORBIDDEN,
            VenueError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            VenueError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts application errors to HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{}", self.0);
        }

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Automatic conversion from VenueError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, VenueError>` in handler functions that return `Result<T, AppError>`.
impl From<VenueError> for AppError {
    fn from(err: VenueError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Wraps the report in a `VenueError::Database` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(VenueError::Database(err))
    }
}

/// Maps a VenueError to an HTTP response
pub fn map_error(err: VenueError) -> Response {
    AppError(err).into_response()
}
