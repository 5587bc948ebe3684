use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username VARCHAR(80) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(200) NOT NULL,
            phone VARCHAR(20) NOT NULL,
            email VARCHAR(120) NOT NULL,
            details TEXT NOT NULL DEFAULT '',
            from_date DATE NOT NULL,
            to_date DATE NOT NULL,
            from_time VARCHAR(20) NOT NULL,
            to_time VARCHAR(20) NOT NULL,
            total_amount DOUBLE PRECISION NOT NULL DEFAULT 0,
            advance DOUBLE PRECISION NOT NULL DEFAULT 0,
            balance DOUBLE PRECISION NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_date_range CHECK (to_date >= from_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create audit_logs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS audit_logs (
            id BIGSERIAL PRIMARY KEY,
            action TEXT NOT NULL,
            username VARCHAR(80) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Tables created with the older bounded column
    sqlx::query("ALTER TABLE audit_logs ALTER COLUMN action TYPE TEXT")
        .execute(pool)
        .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_bookings_from_date ON bookings(from_date)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_to_date ON bookings(to_date)",
        "CREATE INDEX IF NOT EXISTS idx_audit_logs_created_at ON audit_logs(created_at)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
