//! # Hallbook API
//!
//! The API crate provides the web server for the Hallbook auditorium booking
//! service. It exposes JSON endpoints for staff login, booking management,
//! calendars, receipts, the audit log and administrator account management.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Authentication, session context and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.
//! Booking conflict rules live in `hallbook-core` and are shared by the create
//! and edit handlers.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication, sessions and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{http::HeaderValue, Router};
use eyre::{Result, WrapErr};
use hallbook_core::models::receipt::VenueDetails;
use sqlx::PgPool;
use tokio::{net::TcpListener, sync::Mutex};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use middleware::session::SessionStore;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust,ignore
/// let state = Arc::new(ApiState::new(db_pool, "admin", config.venue()));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Logged-in staff sessions
    pub sessions: SessionStore,
    /// Held while a booking is checked for conflicts and written
    pub booking_lock: Mutex<()>,
    /// Username with administrator rights
    pub admin_username: String,
    /// Receipt header
    pub venue: VenueDetails,
}

impl ApiState {
    pub fn new(db_pool: PgPool, admin_username: impl Into<String>, venue: VenueDetails) -> Self {
        Self {
            db_pool,
            sessions: SessionStore::new(),
            booking_lock: Mutex::new(()),
            admin_username: admin_username.into(),
            venue,
        }
    }

    /// Replaces the session store with one whose logins last `ttl`.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = SessionStore::with_ttl(ttl);
        self
    }
}

/// Builds the application router with all routes attached to `state`
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Login, logout, audit log and staff management
        .merge(routes::account::routes())
        // Booking management endpoints
        .merge(routes::booking::routes())
        // Calendar views
        .merge(routes::calendar::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Initializes logging, seeds the administrator account, configures routes
/// and middleware, and serves HTTP until the process is stopped.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool for database operations
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    middleware::auth::ensure_admin_account(
        &db_pool,
        &config.admin_username,
        &config.admin_password,
    )
    .await?;

    // Create shared state with dependencies
    let state = Arc::new(
        ApiState::new(db_pool, config.admin_username.clone(), config.venue())
            .with_session_ttl(config.session_ttl()),
    );

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request tracing and timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
