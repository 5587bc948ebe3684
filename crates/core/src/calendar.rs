//! Occupancy views over the stored bookings for the staff and public
//! calendars.

use std::collections::BTreeMap;

use crate::{
    errors::VenueResult,
    models::{
        booking::Booking,
        calendar::{CalendarEvent, DayStatus, PublicEvent, StaffCalendar},
    },
    time_of_day,
};

/// A daily window at least this long takes the whole day.
pub const FULL_DAY_MINUTES: u16 = 8 * 60;

/// Public calendar colour for partially booked days.
pub const PUBLIC_PARTIAL_COLOR: &str = "#d4af37";

/// Background colours cycled through for events in the day view.
pub const LIGHT_COLORS: [&str; 3] = ["#add8e6", "#ffb6c1", "#ffe5b4"];

impl DayStatus {
    /// Colour of this status on the staff month and year views.
    pub fn color(self) -> &'static str {
        match self {
            DayStatus::Free => "#22c55e",
            DayStatus::Partial => "#a855f7",
            DayStatus::Full => "#ef4444",
        }
    }
}

/// Builds the staff calendar.
///
/// Each booking marks its first day `full` or `partial` depending on the
/// length of its daily window; when several bookings start on the same day
/// the last one decides. Events keep the order of `bookings`.
pub fn staff_calendar(bookings: &[Booking]) -> VenueResult<StaffCalendar> {
    let mut days = BTreeMap::new();
    let mut events = Vec::with_capacity(bookings.len());

    for (index, booking) in bookings.iter().enumerate() {
        let minutes = time_of_day::duration_minutes(&booking.from_time, &booking.to_time)?;
        let status = if minutes >= FULL_DAY_MINUTES {
            DayStatus::Full
        } else {
            DayStatus::Partial
        };
        days.insert(booking.from_date, status);

        let title = if booking.name.is_empty() {
            "Booking".to_string()
        } else {
            booking.name.clone()
        };

        events.push(CalendarEvent {
            id: booking.id,
            title,
            start: format!(
                "{}T{}",
                booking.from_date,
                time_of_day::to_24_hour(&booking.from_time)?
            ),
            end: format!(
                "{}T{}",
                booking.to_date,
                time_of_day::to_24_hour(&booking.to_time)?
            ),
            color: status.color().to_string(),
            light_color: LIGHT_COLORS[index % LIGHT_COLORS.len()].to_string(),
            from_time: booking.from_time.clone(),
            to_time: booking.to_time.clone(),
            details: booking.details.clone(),
        });
    }

    Ok(StaffCalendar { days, events })
}

/// Builds the anonymous calendar: one coloured span per booking.
pub fn public_calendar(bookings: &[Booking]) -> VenueResult<Vec<PublicEvent>> {
    bookings
        .iter()
        .map(|booking| {
            let minutes = time_of_day::duration_minutes(&booking.from_time, &booking.to_time)?;
            let color = if minutes >= FULL_DAY_MINUTES {
                DayStatus::Full.color()
            } else if minutes > 0 {
                PUBLIC_PARTIAL_COLOR
            } else {
                DayStatus::Free.color()
            };

            Ok(PublicEvent {
                start: booking.from_date,
                end: booking.to_date,
                color: color.to_string(),
            })
        })
        .collect()
}
