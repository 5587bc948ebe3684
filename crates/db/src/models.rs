use chrono::{DateTime, NaiveDate, Utc};
use hallbook_core::models::{audit::AuditEntry, booking::Booking, user::User};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
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

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAuditLog {
    pub id: i64,
    pub action: String,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbBooking> for Booking {
    fn from(row: DbBooking) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            details: row.details,
            from_date: row.from_date,
            to_date: row.to_date,
            from_time: row.from_time,
            to_time: row.to_time,
            total_amount: row.total_amount,
            advance: row.advance,
            balance: row.balance,
            created_at: row.created_at,
        }
    }
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        Self {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

impl From<DbAuditLog> for AuditEntry {
    fn from(row: DbAuditLog) -> Self {
        Self {
            id: row.id,
            action: row.action,
            username: row.username,
            created_at: row.created_at,
        }
    }
}
