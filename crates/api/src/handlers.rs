/// Login, logout and staff account management
pub mod account;
/// Audit log recording and listing
pub mod audit;
/// Booking creation, edits, lookups and receipts
pub mod booking;
/// Staff and public calendar views
pub mod calendar;
