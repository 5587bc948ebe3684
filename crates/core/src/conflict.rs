//! # Booking Conflict Checker
//!
//! Decides whether a proposed booking collides with bookings already on
//! record. Both the create and the update paths go through [`check_overlap`]
//! so the two flows can never disagree about what counts as a clash.
//!
//! ## Overlap rule
//!
//! A candidate conflicts with an existing booking when both hold:
//!
//! 1. the inclusive date ranges intersect:
//!    `candidate.from_date <= existing.to_date && candidate.to_date >= existing.from_date`
//! 2. the time-of-day windows intersect, compared as minutes since midnight
//!    with strict inequality on both ends:
//!    `candidate.start < existing.end && candidate.end > existing.start`
//!
//! The two tests are independent. A booking for days 1-2 and one for days
//! 2-3 clash as soon as their daily windows intersect, without comparing
//! individual days. Windows that only touch (`09:00 AM - 12:00 PM` followed
//! by `12:00 PM - 03:00 PM`) do not clash.
//!
//! ## Errors
//!
//! Every time string is parsed with [`time_of_day::to_minutes`]. A malformed
//! value fails the whole check with [`VenueError::Parse`] rather than being
//! read as "no overlap". The candidate is parsed first; stored bookings are
//! parsed in order and the scan stops at the first conflict.
//!
//! [`VenueError::Parse`]: crate::errors::VenueError::Parse

use chrono::NaiveDate;

use crate::{
    errors::VenueResult,
    models::booking::{Booking, NewBooking},
    time_of_day,
};

/// Anything occupying the venue over a date range and a daily time window.
pub trait Reservation {
    fn from_date(&self) -> NaiveDate;
    fn to_date(&self) -> NaiveDate;
    fn from_time(&self) -> &str;
    fn to_time(&self) -> &str;
}

/// A bare `(from_date, to_date, from_time, to_time)` candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow<'a> {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub from_time: &'a str,
    pub to_time: &'a str,
}

impl<'a> BookingWindow<'a> {
    pub fn new(from_date: NaiveDate, to_date: NaiveDate, from_time: &'a str, to_time: &'a str) -> Self {
        Self {
            from_date,
            to_date,
            from_time,
            to_time,
        }
    }
}

impl Reservation for BookingWindow<'_> {
    fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    fn from_time(&self) -> &str {
        self.from_time
    }

    fn to_time(&self) -> &str {
        self.to_time
    }
}

impl Reservation for Booking {
    fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    fn from_time(&self) -> &str {
        &self.from_time
    }

    fn to_time(&self) -> &str {
        &self.to_time
    }
}

impl Reservation for NewBooking {
    fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    fn from_time(&self) -> &str {
        &self.from_time
    }

    fn to_time(&self) -> &str {
        &self.to_time
    }
}

/// A reservation with its daily window resolved to minutes.
#[derive(Debug, Clone, Copy)]
struct Span {
    from_date: NaiveDate,
    to_date: NaiveDate,
    start: u16,
    end: u16,
}

impl Span {
    fn of<R: Reservation + ?Sized>(reservation: &R) -> VenueResult<Self> {
        Ok(Self {
            from_date: reservation.from_date(),
            to_date: reservation.to_date(),
            start: time_of_day::to_minutes(reservation.from_time())?,
            end: time_of_day::to_minutes(reservation.to_time())?,
        })
    }

    fn dates_overlap(&self, other: &Span) -> bool {
        self.from_date <= other.to_date && self.to_date >= other.from_date
    }

    fn times_overlap(&self, other: &Span) -> bool {
        self.start < other.end && self.end > other.start
    }

    fn conflicts_with(&self, other: &Span) -> bool {
        self.dates_overlap(other) && self.times_overlap(other)
    }
}

/// Returns the first existing reservation the candidate clashes with.
///
/// `existing` must already exclude the candidate itself when an existing
/// booking is being edited; see [`excluding`].
///
/// # Errors
///
/// * `VenueError::Parse` - a time on the candidate, or on a booking scanned
///   before a conflict was found, is not in `hh:mm AM/PM` form
pub fn find_conflict<'a, C, R, I>(candidate: &C, existing: I) -> VenueResult<Option<&'a R>>
where
    C: Reservation + ?Sized,
    R: Reservation + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let wanted = Span::of(candidate)?;

    for booking in existing {
        if wanted.conflicts_with(&Span::of(booking)?) {
            return Ok(Some(booking));
        }
    }

    Ok(None)
}

/// `true` if and only if the candidate clashes with at least one existing
/// reservation.
///
/// ```
/// use chrono::NaiveDate;
/// use hallbook_core::conflict::{check_overlap, BookingWindow};
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let existing = [BookingWindow::new(day, day, "10:00 AM", "02:00 PM")];
/// let candidate = BookingWindow::new(day, day, "01:00 PM", "03:00 PM");
///
/// assert!(check_overlap(&candidate, &existing).unwrap());
/// ```
pub fn check_overlap<'a, C, R, I>(candidate: &C, existing: I) -> VenueResult<bool>
where
    C: Reservation + ?Sized,
    R: Reservation + 'a,
    I: IntoIterator<Item = &'a R>,
{
    Ok(find_conflict(candidate, existing)?.is_some())
}

/// Stored bookings other than the one with `id`, for checking an edit.
pub fn excluding(bookings: &[Booking], id: i64) -> impl Iterator<Item = &Booking> {
    bookings.iter().filter(move |booking| booking.id != id)
}
