//! Conversions between the 12-hour `hh:mm AM/PM` strings bookings are stored
//! with and minute offsets within a day.

use chrono::{NaiveTime, Timelike};

use crate::errors::{VenueError, VenueResult};

/// Format used for every stored time of day, e.g. `"02:30 PM"`.
pub const TWELVE_HOUR_FORMAT: &str = "%I:%M %p";

/// Number of minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Parses a 12-hour time of day string.
///
/// The hour may be written with or without a leading zero and the meridiem is
/// case-insensitive. Anything else, such as a 24-hour value like `"14:30"`
/// or an hour of `13`, is a [`VenueError::Parse`].
///
/// chrono lets the space in the format match nothing and skips leading
/// whitespace, so `"02:30PM"` and `" 02:30 PM"` are turned away before it
/// sees them. At least one whitespace character must separate the minutes
/// from the meridiem.
pub fn parse(input: &str) -> VenueResult<NaiveTime> {
    let malformed = || VenueError::Parse(input.to_string());

    if input.starts_with(char::is_whitespace) {
        return Err(malformed());
    }
    let meridiem_at = input
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(malformed)?;
    if !input[..meridiem_at].ends_with(char::is_whitespace) {
        return Err(malformed());
    }

    NaiveTime::parse_from_str(input, TWELVE_HOUR_FORMAT).map_err(|_| malformed())
}

/// Converts a 12-hour time of day string into minutes since midnight.
///
/// ```
/// use hallbook_core::time_of_day::to_minutes;
///
/// assert_eq!(to_minutes("02:30 PM").unwrap(), 870);
/// assert_eq!(to_minutes("12:00 AM").unwrap(), 0);
/// ```
pub fn to_minutes(input: &str) -> VenueResult<u16> {
    let time = parse(input)?;
    Ok((time.hour() * 60 + time.minute()) as u16)
}

/// Renders a 12-hour time of day as `HH:MM:SS` on a 24-hour clock.
pub fn to_24_hour(input: &str) -> VenueResult<String> {
    Ok(parse(input)?.format("%H:%M:%S").to_string())
}

/// Formats minutes since midnight back into the stored 12-hour form.
///
/// Values past the end of the day wrap around.
pub fn format_minutes(minutes: u16) -> String {
    let minutes = u32::from(minutes % MINUTES_PER_DAY);
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .unwrap_or(NaiveTime::MIN)
        .format(TWELVE_HOUR_FORMAT)
        .to_string()
}

/// Length of the window between two times of day, in minutes.
///
/// An end before the start wraps through midnight, so `"10:00 PM"` to
/// `"02:00 AM"` is 240 minutes.
pub fn duration_minutes(from: &str, to: &str) -> VenueResult<u16> {
    let start = i32::from(to_minutes(from)?);
    let end = i32::from(to_minutes(to)?);
    Ok((end - start).rem_euclid(i32::from(MINUTES_PER_DAY)) as u16)
}

/// Every selectable start/end time in a day, `interval_minutes` apart,
/// starting at `12:00 AM`.
///
/// A trailing partial interval is dropped; an interval of zero yields no
/// slots.
pub fn time_slots(interval_minutes: u16) -> Vec<String> {
    if interval_minutes == 0 {
        return Vec::new();
    }

    (0..MINUTES_PER_DAY / interval_minutes)
        .map(|slot| format_minutes(slot * interval_minutes))
        .collect()
}
