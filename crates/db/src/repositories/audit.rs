use crate::models::DbAuditLog;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn log_action(
    pool: &Pool<Postgres>,
    action: &str,
    username: Option<&str>,
) -> Result<DbAuditLog> {
    tracing::debug!("Audit: {}", action);

    let entry = sqlx::query_as::<_, DbAuditLog>(
        r#"
        INSERT INTO audit_logs (action, username, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, action, username, created_at
        "#,
    )
    .bind(action)
    .bind(username)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(entry)
}

/// Newest entries first.
pub async fn list_recent(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<DbAuditLog>> {
    let entries = sqlx::query_as::<_, DbAuditLog>(
        r#"
        SELECT id, action, username, created_at
        FROM audit_logs
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
