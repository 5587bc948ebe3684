use hallbook_api::config::{parse_log_level, ApiConfig};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::time::Duration;
use tracing::Level;

fn config() -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 8080,
        database_url: "postgres://localhost/hallbook".to_string(),
        log_level: Level::INFO,
        cors_origins: None,
        request_timeout: 30,
        session_ttl_minutes: 90,
        admin_username: "admin".to_string(),
        admin_password: "admin123".to_string(),
        venue_name: "Town Hall".to_string(),
        venue_address: "1 Main Road".to_string(),
        venue_contact: "Phone: 000".to_string(),
        receipt_prefix: "HALL".to_string(),
    }
}

#[test]
fn test_server_addr() {
    assert_eq!(config().server_addr(), "127.0.0.1:8080");
}

#[test]
fn test_session_ttl_in_minutes() {
    assert_eq!(config().session_ttl(), Duration::from_secs(90 * 60));
}

#[test]
fn test_venue_details() {
    let venue = config().venue();

    assert_eq!(venue.name, "Town Hall");
    assert_eq!(venue.address, "1 Main Road");
    assert_eq!(venue.file_prefix, "HALL");
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case("info", Level::INFO)]
#[case("warn", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
fn test_parse_log_level(#[case] value: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(value), expected);
}
