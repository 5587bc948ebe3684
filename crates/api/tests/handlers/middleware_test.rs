use argon2::PasswordVerifier;
use axum::http::StatusCode;
use hallbook_api::middleware::{auth, error_handling::map_error};
use hallbook_core::errors::VenueError;
use rstest::rstest;

#[rstest]
#[case(VenueError::NotFound("Booking not found".to_string()), StatusCode::NOT_FOUND)]
#[case(VenueError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(VenueError::Parse("25:00".to_string()), StatusCode::BAD_REQUEST)]
#[case(VenueError::Conflict("overlap".to_string()), StatusCode::CONFLICT)]
#[case(VenueError::Authentication("Invalid credentials".to_string()), StatusCode::UNAUTHORIZED)]
#[case(VenueError::Authorization("Not authorized".to_string()), StatusCode::FORBIDDEN)]
#[case(VenueError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: VenueError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = VenueError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_is_json() {
    let response = map_error(VenueError::Conflict(
        "This booking overlaps with another booking!".to_string(),
    ));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body["error"],
        "Booking conflict: This booking overlaps with another booking!"
    );
}

#[test]
fn test_hash_password() {
    let password = "staff123";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[test]
fn test_hash_password_verifies() {
    let password = "staff123";
    let hashed = auth::hash_password(password).unwrap();

    let argon2 = argon2::Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&hashed).unwrap();

    assert!(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok());
    assert!(argon2
        .verify_password("wrong_password".as_bytes(), &parsed_hash)
        .is_err());
}

#[test]
fn test_hashes_are_salted() {
    let first = auth::hash_password("same").unwrap();
    let second = auth::hash_password("same").unwrap();

    assert_ne!(first, second);
}
