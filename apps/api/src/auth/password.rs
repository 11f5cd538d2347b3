use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::error;

use crate::auth::AuthFailure;
use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AuthFailure> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Failed to hash password: {e}");
            AuthFailure::Unknown
        })
}

/// `Ok(false)` means the password is wrong; `Err` means the stored hash is unusable.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthFailure> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        error!("Failed to parse stored password hash: {e}");
        AuthFailure::Unknown
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

// Argon2 is CPU-bound, so request handlers go through these wrappers, which
// run it inside tokio::task::spawn_blocking.

pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in password hashing: {e}"))
        })?
        .map_err(AppError::from)
}

pub async fn verify_password_blocking(
    password: String,
    stored_hash: String,
) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in password check: {e}"))
        })?
        .map_err(AppError::from)
}
