use chrono::NaiveDate;
use hallbook_core::models::booking::NewBooking;
use mockall::mock;

use crate::models::{DbAuditLog, DbBooking, DbUser};

// Mock repositories for testing
mock! {
    pub BookingRepo {
        pub async fn create_booking(
            &self,
            booking: NewBooking,
        ) -> eyre::Result<DbBooking>;

        pub async fn get_booking_by_id(
            &self,
            id: i64,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn update_booking(
            &self,
            id: i64,
            booking: NewBooking,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn delete_booking(
            &self,
            id: i64,
        ) -> eyre::Result<bool>;

        pub async fn list_bookings(
            &self,
            on_date: Option<NaiveDate>,
        ) -> eyre::Result<Vec<DbBooking>>;

        pub async fn find_bookings_in_range(
            &self,
            from_date: NaiveDate,
            to_date: NaiveDate,
            exclude_id: Option<i64>,
        ) -> eyre::Result<Vec<DbBooking>>;
    }
}

mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            username: String,
            password_hash: String,
        ) -> eyre::Result<DbUser>;

        pub async fn get_user_by_username(
            &self,
            username: String,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn verify_credentials(
            &self,
            username: String,
            password: String,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn delete_user(
            &self,
            username: String,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub AuditRepo {
        pub async fn log_action(
            &self,
            action: String,
            username: Option<String>,
        ) -> eyre::Result<DbAuditLog>;

        pub async fn list_recent(
            &self,
            limit: i64,
        ) -> eyre::Result<Vec<DbAuditLog>>;
    }
}
