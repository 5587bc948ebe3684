use crate::models::DbUser;
use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};

pub async fn create_user(
    pool: &Pool<Postgres>,
    username: &str,
    password_hash: &str,
) -> Result<DbUser> {
    tracing::debug!("Creating user: username={}", username);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (username, password_hash, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, username, password_hash, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_username(pool: &Pool<Postgres>, username: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, password_hash, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list_users(pool: &Pool<Postgres>) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, password_hash, created_at
        FROM users
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn update_password(
    pool: &Pool<Postgres>,
    username: &str,
    password_hash: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET password_hash = $2
        WHERE username = $1
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_user(pool: &Pool<Postgres>, username: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns the user when `password` matches the stored Argon2 hash.
pub async fn verify_credentials(
    pool: &Pool<Postgres>,
    username: &str,
    password: &str,
) -> Result<Option<DbUser>> {
    let Some(user) = get_user_by_username(pool, username).await? else {
        return Ok(None);
    };

    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid.then_some(user))
}
