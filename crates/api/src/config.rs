//! # Server Settings
//!
//! Everything the booking server needs at startup is read from the
//! environment (a `.env` file is loaded first by the binary).
//!
//! | Variable | Default |
//! |---|---|
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `3000` |
//! | `DATABASE_URL` | required |
//! | `LOG_LEVEL` | `info` |
//! | `API_CORS_ORIGINS` | unset, comma-separated when given |
//! | `API_REQUEST_TIMEOUT_SECONDS` | `30` |
//! | `SESSION_TTL_MINUTES` | `720` |
//! | `ADMIN_USERNAME` | `admin` |
//! | `ADMIN_PASSWORD` | `admin123`, only used when the account is first created |
//! | `VENUE_NAME` | `Auditorium` |
//! | `VENUE_ADDRESS`, `VENUE_CONTACT` | empty |
//! | `VENUE_RECEIPT_PREFIX` | `RECEIPT` |

use eyre::{Result, WrapErr};
use hallbook_core::models::receipt::VenueDetails;
use std::{env, time::Duration};
use tracing::Level;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Startup settings for the booking server.
///
/// ```no_run
/// use hallbook_api::config::ApiConfig;
///
/// fn main() -> eyre::Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Binding {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: Level,

    /// Origins allowed to call the API from a browser. `None` disables CORS.
    pub cors_origins: Option<Vec<String>>,

    /// Seconds before a request is abandoned
    pub request_timeout: u64,

    /// Minutes a login stays valid
    pub session_ttl_minutes: u64,

    /// The one account allowed to manage staff and read the audit log
    pub admin_username: String,

    /// Seeds the admin account on first start; ignored afterwards
    pub admin_password: String,

    pub venue_name: String,
    pub venue_address: String,
    pub venue_contact: String,
    pub receipt_prefix: String,
}

impl ApiConfig {
    /// Reads the settings from the environment.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing or `API_PORT` is not a valid port.
    /// A bad `API_REQUEST_TIMEOUT_SECONDS` falls back to 30 seconds, a bad
    /// `SESSION_TTL_MINUTES` to 720 minutes and an unknown `LOG_LEVEL` to
    /// `info`.
    pub fn from_env() -> Result<Self> {
        let port = env_or("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        });

        Ok(Self {
            host: env_or("API_HOST", "0.0.0.0"),
            port,
            database_url,
            log_level: parse_log_level(&env_or("LOG_LEVEL", "info")),
            cors_origins,
            request_timeout: env_or("API_REQUEST_TIMEOUT_SECONDS", "30")
                .parse()
                .unwrap_or(30),
            session_ttl_minutes: env_or("SESSION_TTL_MINUTES", "720")
                .parse()
                .unwrap_or(720),
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password: env_or("ADMIN_PASSWORD", "admin123"),
            venue_name: env_or("VENUE_NAME", "Auditorium"),
            venue_address: env_or("VENUE_ADDRESS", ""),
            venue_contact: env_or("VENUE_CONTACT", ""),
            receipt_prefix: env_or("VENUE_RECEIPT_PREFIX", "RECEIPT"),
        })
    }

    /// `host:port` to bind the listener to.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_minutes * 60)
    }

    /// Venue header printed on receipts
    pub fn venue(&self) -> VenueDetails {
        VenueDetails {
            name: self.venue_name.clone(),
            address: self.venue_address.clone(),
            contact: self.venue_contact.clone(),
            file_prefix: self.receipt_prefix.clone(),
        }
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
