//! Email/password authentication with server-side session tokens.

use axum::http::StatusCode;
use thiserror::Error;

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod sessions;

pub use middleware::{require_auth, AuthUser};

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const SESSION_DAYS: i64 = 30;
pub const SESSION_COOKIE: &str = "session";

/// The fixed set of auth outcomes a user can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("email already in use")]
    EmailAlreadyInUse,
    #[error("weak password")]
    WeakPassword,
    #[error("unknown auth error")]
    Unknown,
}

impl AuthFailure {
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::UserNotFound => "user-not-found",
            AuthFailure::WrongPassword => "wrong-password",
            AuthFailure::EmailAlreadyInUse => "email-already-in-use",
            AuthFailure::WeakPassword => "weak-password",
            AuthFailure::Unknown => "unknown",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::UserNotFound => "No user found with this email.",
            AuthFailure::WrongPassword => "Incorrect password. Please try again.",
            AuthFailure::EmailAlreadyInUse => "This email is already registered.",
            AuthFailure::WeakPassword => {
                "Password is too weak. It must be at least 6 characters long."
            }
            AuthFailure::Unknown => "An unexpected error occurred. Please try again.",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthFailure::UserNotFound | AuthFailure::WrongPassword => StatusCode::UNAUTHORIZED,
            AuthFailure::EmailAlreadyInUse => StatusCode::CONFLICT,
            AuthFailure::WeakPassword => StatusCode::BAD_REQUEST,
            AuthFailure::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn check_password_strength(password: &str) -> Result<(), AuthFailure> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthFailure::WeakPassword);
    }
    Ok(())
}

/// Lowercases and trims an email, returning `None` if it is not plausibly an address.
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    let plausible = !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);
    plausible.then_some(email)
}
