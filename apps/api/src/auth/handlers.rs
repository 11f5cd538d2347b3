//! Axum route handlers for sign-up, sign-in and sign-out.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::middleware::SessionToken;
use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::sessions::{
    create_session, create_user, delete_session, find_user, find_user_by_email,
};
use crate::auth::{
    check_password_strength, normalize_email, AuthFailure, AuthUser, SESSION_COOKIE, SESSION_DAYS,
};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={max_age_secs}")
}

fn issue_session_failure(e: sqlx::Error) -> AppError {
    error!("Failed to create auth session: {e}");
    AppError::Auth(AuthFailure::Unknown)
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }
    let email = normalize_email(&req.email)
        .ok_or_else(|| AppError::Validation("email is not a valid address".to_string()))?;
    check_password_strength(&req.password)?;

    let password_hash = hash_password_blocking(req.password.clone()).await?;
    let user = create_user(&state.db, username, &email, &password_hash).await?;
    let token = create_session(&state.db, user.id)
        .await
        .map_err(issue_session_failure)?;

    let cookie = session_cookie(&token, chrono::Duration::days(SESSION_DAYS).num_seconds());
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse { user, token }),
    ))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&req.email).ok_or(AuthFailure::UserNotFound)?;

    let user = find_user_by_email(&state.db, &email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {e}");
            AuthFailure::Unknown
        })?
        .ok_or(AuthFailure::UserNotFound)?;

    if !verify_password_blocking(req.password.clone(), user.password_hash.clone()).await? {
        info!("Failed login for user {}", user.id);
        return Err(AuthFailure::WrongPassword.into());
    }

    let token = create_session(&state.db, user.id)
        .await
        .map_err(issue_session_failure)?;

    let cookie = session_cookie(&token, chrono::Duration::days(SESSION_DAYS).num_seconds());
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse { user, token }),
    ))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<impl IntoResponse, AppError> {
    delete_session(&state.db, &token).await?;
    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, session_cookie("", 0))],
    ))
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<User>, AppError> {
    let user = find_user(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(Json(user))
}
