use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How much of a day is taken, as shown on the calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Free,
    Partial,
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub start: String,
    pub end: String,
    pub color: String,
    #[serde(rename = "lightColor")]
    pub light_color: String,
    pub from_time: String,
    pub to_time: String,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCalendar {
    pub days: BTreeMap<NaiveDate, DayStatus>,
    pub events: Vec<CalendarEvent>,
}

/// Calendar entry visible without logging in: dates and occupancy only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicEvent {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub color: String,
}
