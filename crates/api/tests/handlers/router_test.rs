use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{bearer, build_state, test_server, ADMIN};

fn booking_payload(from_date: &str, to_date: &str, from_time: &str, to_time: &str) -> Value {
    json!({
        "name": "Annual Day",
        "phone": "9876543210",
        "from_date": from_date,
        "to_date": to_date,
        "from_time": from_time,
        "to_time": to_time,
        "total_amount": 5000.0,
        "advance": 1000.0,
        "balance": 4000.0
    })
}

#[tokio::test]
async fn test_health_and_version() {
    let server = test_server(build_state());

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");

    let response = server.get("/version").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["version"],
        env!("CARGO_PKG_VERSION")
    );
}

#[tokio::test]
async fn test_time_slots_endpoint() {
    let server = test_server(build_state());

    let slots: Vec<String> = server.get("/api/time-slots").await.json();

    assert_eq!(slots.len(), 48);
    assert_eq!(slots[0], "12:00 AM");
    assert_eq!(slots[47], "11:30 PM");
}

#[tokio::test]
async fn test_bookings_require_login() {
    let server = test_server(build_state());

    let response = server.get("/api/bookings").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"],
        "Authentication error: Login required"
    );
}

#[tokio::test]
async fn test_unknown_session_is_rejected() {
    let server = test_server(build_state());
    let (name, value) = bearer(Uuid::new_v4());

    let response = server
        .post("/api/bookings")
        .add_header(name, value)
        .json(&booking_payload("2024-06-01", "2024-06-01", "10:00 AM", "02:00 PM"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reversed_date_range_is_rejected_before_checking() {
    let state = build_state();
    let token = state.sessions.create("staff1").await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let response = server
        .post("/api/bookings")
        .add_header(name, value)
        .json(&booking_payload("2024-06-05", "2024-06-01", "10:00 AM", "02:00 PM"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: From date 2024-06-05 is after to date 2024-06-01"
    );
}

#[tokio::test]
async fn test_malformed_time_is_rejected() {
    let state = build_state();
    let token = state.sessions.create("staff1").await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let response = server
        .put("/api/bookings/3")
        .add_header(name, value)
        .json(&booking_payload("2024-06-01", "2024-06-01", "14:00", "04:00 PM"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Invalid time of day '14:00': expected hh:mm AM/PM"
    );
}

#[tokio::test]
async fn test_invalid_date_lookup_returns_empty_list() {
    let state = build_state();
    let token = state.sessions.create("staff1").await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let response = server
        .get("/api/bookings/date/not-a-date")
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>(), Vec::<Value>::new());
}

#[tokio::test]
async fn test_audit_log_is_admin_only() {
    let state = build_state();
    let token = state.sessions.create("staff1").await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let response = server.get("/api/audit").add_header(name, value).await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["error"],
        "Authorization error: You don't have permission to view audit logs."
    );
}

#[tokio::test]
async fn test_staff_management_is_admin_only() {
    let state = build_state();
    let token = state.sessions.create("staff1").await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let response = server
        .post("/api/admin/staff")
        .add_header(name, value)
        .json(&json!({ "username": "staff9", "password": "secret" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_delete_itself() {
    let state = build_state();
    let token = state.sessions.create(ADMIN).await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let response = server
        .delete(&format!("/api/admin/staff/{}", ADMIN))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Cannot delete admin or invalid user."
    );
}

#[tokio::test]
async fn test_create_staff_requires_password() {
    let state = build_state();
    let token = state.sessions.create(ADMIN).await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let response = server
        .post("/api/admin/staff")
        .add_header(name, value)
        .json(&json!({ "username": "staff9", "password": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overlong_staff_username_is_rejected() {
    let state = build_state();
    let token = state.sessions.create(ADMIN).await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let response = server
        .post("/api/admin/staff")
        .add_header(name, value)
        .json(&json!({ "username": "s".repeat(81), "password": "secret" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Username must be at most 80 characters"
    );
}

#[tokio::test]
async fn test_overlong_phone_is_a_bad_request() {
    let state = build_state();
    let token = state.sessions.create("staff1").await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let mut payload = booking_payload("2024-06-01", "2024-06-01", "10:00 AM", "02:00 PM");
    payload["phone"] = json!("9".repeat(25));

    let response = server
        .post("/api/bookings")
        .add_header(name, value)
        .json(&payload)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Phone number must be at most 20 characters"
    );
}

#[tokio::test]
async fn test_time_without_meridiem_space_is_rejected() {
    let state = build_state();
    let token = state.sessions.create("staff1").await;
    let server = test_server(state);
    let (name, value) = bearer(token);

    let response = server
        .post("/api/bookings")
        .add_header(name, value)
        .json(&booking_payload("2024-06-01", "2024-06-01", "10:00AM", "02:00 PM"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Invalid time of day '10:00AM': expected hh:mm AM/PM"
    );
}
