use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{VenueError, VenueResult},
    time_of_day,
};

/// Email recorded when a booking is made without one.
pub const PLACEHOLDER_EMAIL: &str = "not_provided@noemail.com";

/// Longest values the `bookings` columns hold, in characters.
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 120;
pub const MAX_TIME_LEN: usize = 20;

fn ensure_fits(field: &str, value: &str, max: usize) -> VenueResult<()> {
    if value.chars().count() > max {
        return Err(VenueError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub details: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub from_time: String,
    pub to_time: String,
    pub total_amount: f64,
    pub advance: f64,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub from_time: String,
    pub to_time: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub advance: f64,
    #[serde(default)]
    pub balance: f64,
}

/// A booking request that passed validation and is ready to be checked for
/// conflicts and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub details: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub from_time: String,
    pub to_time: String,
    pub total_amount: f64,
    pub advance: f64,
    pub balance: f64,
}

impl BookingRequest {
    /// Normalises the request and rejects anything that cannot be stored.
    ///
    /// # Errors
    ///
    /// * `VenueError::Validation` - missing name or phone, a non-numeric
    ///   phone, a value too long for its column, `from_date` after
    ///   `to_date`, or a negative amount
    /// * `VenueError::Parse` - either time is not in `hh:mm AM/PM` form
    pub fn validate(self) -> VenueResult<NewBooking> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(VenueError::Validation("Name is required".to_string()));
        }
        ensure_fits("Name", &name, MAX_NAME_LEN)?;

        let phone = self
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| VenueError::Validation("Phone number is required".to_string()))?;
        let digits = phone.strip_prefix('+').unwrap_or(phone);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(VenueError::Validation(format!(
                "Phone number '{}' must contain only digits",
                phone
            )));
        }
        ensure_fits("Phone number", phone, MAX_PHONE_LEN)?;

        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(PLACEHOLDER_EMAIL)
            .to_string();
        ensure_fits("Email", &email, MAX_EMAIL_LEN)?;

        if self.from_date > self.to_date {
            return Err(VenueError::Validation(format!(
                "From date {} is after to date {}",
                self.from_date, self.to_date
            )));
        }

        time_of_day::parse(&self.from_time)?;
        time_of_day::parse(&self.to_time)?;
        ensure_fits("From time", &self.from_time, MAX_TIME_LEN)?;
        ensure_fits("To time", &self.to_time, MAX_TIME_LEN)?;

        for (field, amount) in [
            ("total_amount", self.total_amount),
            ("advance", self.advance),
            ("balance", self.balance),
        ] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(VenueError::Validation(format!(
                    "{} must be a non-negative amount",
                    field
                )));
            }
        }

        Ok(NewBooking {
            name,
            phone: phone.to_string(),
            email,
            details: self.details.unwrap_or_default(),
            from_date: self.from_date,
            to_date: self.to_date,
            from_time: self.from_time,
            to_time: self.to_time,
            total_amount: self.total_amount,
            advance: self.advance,
            balance: self.balance,
        })
    }
}

/// Booking as shown in the dashboard detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetail {
    pub id: i64,
    pub name: String,
    pub details: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub from_time: String,
    pub to_time: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDetail {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            name: booking.name,
            details: booking.details,
            from_date: booking.from_date,
            to_date: booking.to_date,
            from_time: booking.from_time,
            to_time: booking.to_time,
            created_at: booking.created_at,
        }
    }
}

/// Entry in the per-date booking lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSummary {
    pub id: i64,
    pub name: String,
    pub from_time: String,
    pub to_time: String,
}

impl From<Booking> for BookingSummary {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            name: booking.name,
            from_time: booking.from_time,
            to_time: booking.to_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBookingResponse {
    pub id: i64,
    pub deleted: bool,
}
