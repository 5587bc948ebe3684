pub mod account;
pub mod booking;
pub mod calendar;
pub mod health;
