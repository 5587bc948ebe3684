use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use fake::{faker::name::en::Name, Fake};
use hallbook_api::{
    handlers::booking::{reject_conflict, OVERLAP_MESSAGE},
    middleware::error_handling::AppError,
};
use hallbook_core::{
    errors::VenueError,
    models::booking::{Booking, BookingRequest},
};
use hallbook_db::models::DbBooking;
use mockall::predicate;
use pretty_assertions::assert_eq;

use crate::test_utils::TestContext;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn request(from: u32, to: u32, from_time: &str, to_time: &str) -> BookingRequest {
    BookingRequest {
        name: Name().fake(),
        phone: Some("9876543210".to_string()),
        email: None,
        details: None,
        from_date: date(from),
        to_date: date(to),
        from_time: from_time.to_string(),
        to_time: to_time.to_string(),
        total_amount: 12_000.0,
        advance: 2_000.0,
        balance: 10_000.0,
    }
}

fn row(id: i64, from: u32, to: u32, from_time: &str, to_time: &str) -> DbBooking {
    DbBooking {
        id,
        name: format!("Booking {}", id),
        phone: "9876543210".to_string(),
        email: "guest@example.com".to_string(),
        details: String::new(),
        from_date: date(from),
        to_date: date(to),
        from_time: from_time.to_string(),
        to_time: to_time.to_string(),
        total_amount: 0.0,
        advance: 0.0,
        balance: 0.0,
        created_at: Utc::now(),
    }
}

// Same steps as `handlers::booking::update_booking` (lookup, range load
// without `id`, `reject_conflict`, write, audit) with the repositories
// replaced by mocks. Keep the two in step when the handler changes.
async fn test_update_booking_wrapper(
    ctx: &TestContext,
    id: i64,
    payload: BookingRequest,
    username: &str,
) -> Result<Booking, AppError> {
    let candidate = payload.validate()?;

    ctx.booking_repo
        .get_booking_by_id(id)
        .await?
        .ok_or_else(|| VenueError::NotFound(format!("Booking with ID {} not found", id)))?;

    let existing: Vec<Booking> = ctx
        .booking_repo
        .find_bookings_in_range(candidate.from_date, candidate.to_date, Some(id))
        .await?
        .into_iter()
        .map(Booking::from)
        .collect();

    reject_conflict(&candidate, &existing)?;

    let updated = ctx
        .booking_repo
        .update_booking(id, candidate)
        .await?
        .ok_or_else(|| VenueError::NotFound(format!("Booking with ID {} not found", id)))?;

    ctx.audit_repo
        .log_action(
            format!("Booking {} updated by {}", id, username),
            Some(username.to_string()),
        )
        .await?;

    Ok(Booking::from(updated))
}

#[test_log::test(tokio::test)]
async fn test_edit_excludes_the_booking_itself() {
    let mut ctx = TestContext::new();
    let current = row(5, 10, 10, "09:00 AM", "05:00 PM");
    let stored = current.clone();

    ctx.booking_repo
        .expect_get_booking_by_id()
        .with(predicate::eq(5))
        .returning(move |_| Ok(Some(stored.clone())));
    // The query leaves booking 5 out, so nothing else is on that day.
    ctx.booking_repo
        .expect_find_bookings_in_range()
        .with(
            predicate::eq(date(10)),
            predicate::eq(date(10)),
            predicate::eq(Some(5)),
        )
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));
    ctx.booking_repo
        .expect_update_booking()
        .times(1)
        .returning(move |id, booking| {
            let mut updated = row(id, 10, 10, &booking.from_time, &booking.to_time);
            updated.name = booking.name;
            Ok(Some(updated))
        });
    ctx.audit_repo
        .expect_log_action()
        .with(
            predicate::eq("Booking 5 updated by staff1".to_string()),
            predicate::eq(Some("staff1".to_string())),
        )
        .times(1)
        .returning(|action, username| {
            Ok(hallbook_db::models::DbAuditLog {
                id: 1,
                action,
                username,
                created_at: Utc::now(),
            })
        });

    let updated = test_update_booking_wrapper(&ctx, 5, request(10, 10, "09:00 AM", "05:00 PM"), "staff1")
        .await
        .expect("unchanged booking should not conflict with itself");

    assert_eq!(updated.id, 5);
    assert_eq!(updated.from_time, current.from_time);
}

#[test_log::test(tokio::test)]
async fn test_edit_into_another_booking_is_rejected() {
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_get_booking_by_id()
        .returning(|id| Ok(Some(row(id, 10, 10, "09:00 AM", "11:00 AM"))));
    ctx.booking_repo
        .expect_find_bookings_in_range()
        .returning(|_, _, _| Ok(vec![row(6, 10, 10, "12:00 PM", "06:00 PM")]));
    ctx.booking_repo.expect_update_booking().times(0);
    ctx.audit_repo.expect_log_action().times(0);

    let err = test_update_booking_wrapper(&ctx, 5, request(10, 10, "09:00 AM", "01:00 PM"), "staff1")
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(
        err.0.to_string(),
        format!("Booking conflict: {}", OVERLAP_MESSAGE)
    );
}

#[tokio::test]
async fn test_edit_of_missing_booking_is_not_found() {
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_get_booking_by_id()
        .returning(|_| Ok(None));
    ctx.booking_repo.expect_find_bookings_in_range().times(0);

    let err = test_update_booking_wrapper(&ctx, 99, request(10, 10, "09:00 AM", "01:00 PM"), "staff1")
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_stored_booking_fails_the_edit() {
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_get_booking_by_id()
        .returning(|id| Ok(Some(row(id, 10, 10, "09:00 AM", "11:00 AM"))));
    ctx.booking_repo
        .expect_find_bookings_in_range()
        .returning(|_, _, _| Ok(vec![row(6, 10, 10, "noon", "06:00 PM")]));
    ctx.booking_repo.expect_update_booking().times(0);

    let err = test_update_booking_wrapper(&ctx, 5, request(10, 10, "07:00 PM", "09:00 PM"), "staff1")
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(matches!(err.0, VenueError::Parse(ref value) if value == "noon"));
}

#[test]
fn test_reject_conflict_maps_clash_to_409() {
    let candidate = request(1, 2, "04:00 PM", "08:00 PM").validate().unwrap();
    let existing = vec![Booking::from(row(3, 2, 3, "09:00 AM", "05:00 PM"))];

    let err = reject_conflict(&candidate, &existing).unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert!(matches!(err.0, VenueError::Conflict(ref message) if message == OVERLAP_MESSAGE));
}

#[test]
fn test_reject_conflict_allows_touching_and_empty() {
    let candidate = request(10, 10, "12:00 PM", "03:00 PM").validate().unwrap();
    let existing = vec![Booking::from(row(3, 10, 10, "09:00 AM", "12:00 PM"))];

    assert!(reject_conflict(&candidate, &existing).is_ok());
    assert!(reject_conflict(&candidate, &[]).is_ok());
}
