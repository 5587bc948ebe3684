use crate::models::DbBooking;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use hallbook_core::models::booking::NewBooking;
use sqlx::{Pool, Postgres};

pub async fn create_booking(pool: &Pool<Postgres>, booking: &NewBooking) -> Result<DbBooking> {
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: name={}, from={} {}, to={} {}",
        booking.name, booking.from_date, booking.from_time, booking.to_date, booking.to_time
    );

    let created = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (
            name, phone, email, details, from_date, to_date, from_time, to_time,
            total_amount, advance, balance, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id, name, phone, email, details, from_date, to_date, from_time, to_time,
                  total_amount, advance, balance, created_at
        "#,
    )
    .bind(&booking.name)
    .bind(&booking.phone)
    .bind(&booking.email)
    .bind(&booking.details)
    .bind(booking.from_date)
    .bind(booking.to_date)
    .bind(&booking.from_time)
    .bind(&booking.to_time)
    .bind(booking.total_amount)
    .bind(booking.advance)
    .bind(booking.balance)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Booking created successfully: id={}", created.id);
    Ok(created)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, name, phone, email, details, from_date, to_date, from_time, to_time,
               total_amount, advance, balance, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Replaces every editable field of booking `id`. Returns `None` when the
/// booking does not exist.
pub async fn update_booking(
    pool: &Pool<Postgres>,
    id: i64,
    booking: &NewBooking,
) -> Result<Option<DbBooking>> {
    tracing::debug!("Updating booking: id={}", id);

    let updated = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET name = $2, phone = $3, email = $4, details = $5,
            from_date = $6, to_date = $7, from_time = $8, to_time = $9,
            total_amount = $10, advance = $11, balance = $12
        WHERE id = $1
        RETURNING id, name, phone, email, details, from_date, to_date, from_time, to_time,
                  total_amount, advance, balance, created_at
        "#,
    )
    .bind(id)
    .bind(&booking.name)
    .bind(&booking.phone)
    .bind(&booking.email)
    .bind(&booking.details)
    .bind(booking.from_date)
    .bind(booking.to_date)
    .bind(&booking.from_time)
    .bind(&booking.to_time)
    .bind(booking.total_amount)
    .bind(booking.advance)
    .bind(booking.balance)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_booking(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Dashboard listing: latest start date first, then by start time as
/// entered. With `on_date`, only bookings whose range contains that date.
pub async fn list_bookings(
    pool: &Pool<Postgres>,
    on_date: Option<NaiveDate>,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, name, phone, email, details, from_date, to_date, from_time, to_time,
               total_amount, advance, balance, created_at
        FROM bookings
        WHERE $1::DATE IS NULL OR (from_date <= $1 AND to_date >= $1)
        ORDER BY from_date DESC, from_time ASC
        "#,
    )
    .bind(on_date)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Every booking in insertion order.
pub async fn list_all_bookings(pool: &Pool<Postgres>) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, name, phone, email, details, from_date, to_date, from_time, to_time,
               total_amount, advance, balance, created_at
        FROM bookings
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Bookings whose date range intersects `from_date..=to_date`, optionally
/// leaving out the booking being edited. These are the only rows a conflict
/// check needs to see.
pub async fn find_bookings_in_range(
    pool: &Pool<Postgres>,
    from_date: NaiveDate,
    to_date: NaiveDate,
    exclude_id: Option<i64>,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, name, phone, email, details, from_date, to_date, from_time, to_time,
               total_amount, advance, balance, created_at
        FROM bookings
        WHERE to_date >= $1
          AND from_date <= $2
          AND ($3::BIGINT IS NULL OR id <> $3)
        ORDER BY id ASC
        "#,
    )
    .bind(from_date)
    .bind(to_date)
    .bind(exclude_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!(
        "Found {} bookings between {} and {} (excluding {:?})",
        bookings.len(), from_date, to_date, exclude_id
    );
    Ok(bookings)
}
