//! # Hallbook Core
//!
//! Domain types and pure logic for the auditorium booking service: the
//! booking conflict checker, 12-hour time handling, calendar occupancy and
//! receipt composition. Nothing in this crate performs I/O.

pub mod calendar;
pub mod conflict;
pub mod errors;
pub mod models;
pub mod receipt;
pub mod time_of_day;
