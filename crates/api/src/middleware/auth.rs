//! # Authentication Module
//!
//! Password hashing and credential checks for staff accounts, plus seeding
//! of the administrator account at startup.
//!
//! The implementation uses Argon2, a secure password hashing algorithm,
//! to protect user passwords from common attacks like rainbow tables
//! and brute force attempts.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use eyre::Result;
use hallbook_db::models::DbUser;
use sqlx::PgPool;
use tracing::info;

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for every call and the result is a PHC
/// string (algorithm, version, parameters, salt and hash).
///
/// # Example
///
/// ```rust
/// let hashed = hallbook_api::middleware::auth::hash_password("staff123").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks a username/password pair against the stored hash
///
/// # Returns
///
/// * `Result<Option<DbUser>>` - The user when the password matches, `None`
///   for an unknown user or a wrong password
pub async fn verify_credentials(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<Option<DbUser>> {
    let user = hallbook_db::repositories::user::verify_credentials(pool, username, password).await?;
    Ok(user)
}

/// Creates the administrator account with `password` if it does not exist yet.
///
/// An existing account keeps its current password.
pub async fn ensure_admin_account(pool: &PgPool, username: &str, password: &str) -> Result<()> {
    if hallbook_db::repositories::user::get_user_by_username(pool, username)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    hallbook_db::repositories::user::create_user(pool, username, &password_hash).await?;
    info!("Created administrator account '{}'", username);

    Ok(())
}
