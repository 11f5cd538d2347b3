//! Persistence for quiz attempts and the aggregate leaderboard.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::quiz::{AnswerRecord, LeaderboardRow, QuizAttemptRow};
use crate::quiz::score_answers;

/// Grades, scores and stores one attempt. Correctness is decided here from the
/// selected and correct answers; the client's flags are overwritten.
pub async fn record_attempt(
    pool: &PgPool,
    user_id: Uuid,
    topic: &str,
    answers: Vec<AnswerRecord>,
) -> Result<QuizAttemptRow, AppError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }
    let answers: Vec<AnswerRecord> = answers.into_iter().map(AnswerRecord::graded).collect();
    let score = score_answers(&answers)?;

    let attempt = sqlx::query_as::<_, QuizAttemptRow>(
        r#"
        INSERT INTO quiz_attempts (id, user_id, topic, answers, score, total)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(topic)
    .bind(Json(answers))
    .bind(score.correct)
    .bind(score.total)
    .fetch_one(pool)
    .await?;

    info!(
        "User {user_id} scored {}/{} on '{topic}'",
        attempt.score, attempt.total
    );
    Ok(attempt)
}

/// A user's attempts, newest first.
pub async fn list_attempts(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<QuizAttemptRow>, AppError> {
    let attempts = sqlx::query_as::<_, QuizAttemptRow>(
        r#"
        SELECT * FROM quiz_attempts
        WHERE user_id = $1
        ORDER BY created_at DESC, id
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(attempts)
}

/// Top users by total points across all attempts.
pub async fn leaderboard(pool: &PgPool, limit: i64) -> Result<Vec<LeaderboardRow>, AppError> {
    let rows = sqlx::query_as::<_, LeaderboardRow>(
        r#"
        SELECT u.id AS user_id,
               u.username,
               u.photo_url,
               SUM(a.score)::BIGINT AS points,
               COUNT(a.id) AS attempts
        FROM quiz_attempts a
        JOIN users u ON u.id = a.user_id
        GROUP BY u.id, u.username, u.photo_url
        ORDER BY points DESC, u.username
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
