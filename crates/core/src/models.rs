pub mod audit;
pub mod booking;
pub mod calendar;
pub mod receipt;
pub mod user;
