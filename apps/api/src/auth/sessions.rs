//! User and session persistence.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::{AuthFailure, SESSION_DAYS};
use crate::models::user::User;

pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, AuthFailure> {
    let result = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => {
            info!("Created user {} ({})", user.id, user.username);
            Ok(user)
        }
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(AuthFailure::EmailAlreadyInUse)
        }
        Err(e) => {
            tracing::error!("Failed to create user: {e}");
            Err(AuthFailure::Unknown)
        }
    }
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Creates a session for `user_id` and returns its token. The user's expired
/// sessions are deleted first.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let pruned = sqlx::query("DELETE FROM auth_sessions WHERE user_id = $1 AND expires_at <= now()")
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();
    if pruned > 0 {
        debug!("Pruned {pruned} expired sessions for user {user_id}");
    }

    let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let expires_at = Utc::now() + Duration::days(SESSION_DAYS);

    sqlx::query("INSERT INTO auth_sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolves a live session token to its user.
pub async fn user_for_token(pool: &PgPool, token: &str) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM auth_sessions WHERE token = $1 AND expires_at > now()")
        .bind(token)
        .fetch_optional(pool)
        .await
}

pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM auth_sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}
