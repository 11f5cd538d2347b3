//! Live study sessions and their participant sets.
//!
//! `participants` is mutated only through single-statement array union/remove
//! updates, so concurrent joins and leaves never lose each other.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::social::StudySessionRow;

pub async fn create_study_session(
    pool: &PgPool,
    owner_id: Uuid,
    topic: &str,
) -> Result<StudySessionRow, AppError> {
    let session = sqlx::query_as::<_, StudySessionRow>(
        r#"
        INSERT INTO study_sessions (id, topic, owner_id, participants, active)
        VALUES ($1, $2, $3, ARRAY[$3]::UUID[], TRUE)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(topic)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    info!("User {owner_id} started study session {} on '{topic}'", session.id);
    Ok(session)
}

pub async fn list_active_sessions(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<StudySessionRow>, AppError> {
    let sessions = sqlx::query_as::<_, StudySessionRow>(
        "SELECT * FROM study_sessions WHERE active ORDER BY start_time DESC, id LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(sessions)
}

pub async fn get_study_session(pool: &PgPool, session_id: Uuid) -> Result<StudySessionRow, AppError> {
    sqlx::query_as::<_, StudySessionRow>("SELECT * FROM study_sessions WHERE id = $1")
        .bind(session_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Study session {session_id} not found")))
}

/// Adds `user_id` to an active session. Joining twice is a no-op.
pub async fn join_study_session(
    pool: &PgPool,
    session_id: Uuid,
    user_id: Uuid,
) -> Result<StudySessionRow, AppError> {
    let joined = sqlx::query_as::<_, StudySessionRow>(
        r#"
        UPDATE study_sessions
        SET participants = array_append(participants, $2)
        WHERE id = $1 AND active AND NOT ($2 = ANY(participants))
        RETURNING *
        "#,
    )
    .bind(session_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    if let Some(session) = joined {
        info!("User {user_id} joined study session {session_id}");
        return Ok(session);
    }

    // Nothing updated: missing, ended, or already joined.
    let session = get_study_session(pool, session_id).await?;
    if !session.active {
        return Err(AppError::Validation(format!(
            "Study session {session_id} has ended"
        )));
    }
    Ok(session)
}

/// Removes `user_id` from a session. When the owner leaves, the session ends
/// for everyone; the row is kept with `active = false`.
pub async fn leave_study_session(
    pool: &PgPool,
    session_id: Uuid,
    user_id: Uuid,
) -> Result<StudySessionRow, AppError> {
    let session = get_study_session(pool, session_id).await?;

    let updated = if session.owner_id == user_id {
        info!("Owner {user_id} ended study session {session_id}");
        sqlx::query_as::<_, StudySessionRow>(
            "UPDATE study_sessions SET active = FALSE WHERE id = $1 RETURNING *",
        )
        .bind(session_id)
        .fetch_one(pool)
        .await?
    } else {
        sqlx::query_as::<_, StudySessionRow>(
            r#"
            UPDATE study_sessions
            SET participants = array_remove(participants, $2)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?
    };

    Ok(updated)
}
