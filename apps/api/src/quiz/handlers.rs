use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::quiz::{AnswerRecord, LeaderboardRow, QuizAttemptRow};
use crate::quiz::attempts::{leaderboard, list_attempts, record_attempt};
use crate::quiz::leaderboard_size;
use crate::social::page_size;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordAttemptRequest {
    pub topic: String,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// POST /api/v1/quiz/attempts
pub async fn handle_record_attempt(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<RecordAttemptRequest>,
) -> Result<(StatusCode, Json<QuizAttemptRow>), AppError> {
    let attempt = record_attempt(&state.db, user_id, &req.topic, req.answers).await?;
    Ok((StatusCode::CREATED, Json(attempt)))
}

/// GET /api/v1/quiz/attempts, the caller's own attempts
pub async fn handle_list_attempts(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(q): Query<LimitQuery>,
) -> Result<Json<Vec<QuizAttemptRow>>, AppError> {
    Ok(Json(
        list_attempts(&state.db, user_id, page_size(q.limit)).await?,
    ))
}

/// GET /api/v1/quiz/leaderboard
pub async fn handle_leaderboard(
    State(state): State<AppState>,
    Query(q): Query<LimitQuery>,
) -> Result<Json<Vec<LeaderboardRow>>, AppError> {
    Ok(Json(
        leaderboard(&state.db, leaderboard_size(q.limit)).await?,
    ))
}
