//! Axum route handlers for posts, comments, likes and study sessions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::social::{CommentRow, PostRow, StudySessionRow};
use crate::social::posts::{
    add_comment, create_post, get_post, has_liked, like_post, list_comments, list_posts,
    unlike_post, LikeState,
};
use crate::social::study_sessions::{
    create_study_session, get_study_session, join_study_session, leave_study_session,
    list_active_sessions,
};
use crate::social::{page_size, validate_text};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostRow,
    pub liked_by_me: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Posts
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/posts
pub async fn handle_create_post(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<ContentRequest>,
) -> Result<(StatusCode, Json<PostRow>), AppError> {
    let content = validate_text("content", &req.content)?;
    let post = create_post(&state.db, user_id, content).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/v1/posts, newest first
pub async fn handle_list_posts(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<PostRow>>, AppError> {
    Ok(Json(list_posts(&state.db, page_size(page.limit)).await?))
}

/// GET /api/v1/posts/:id
pub async fn handle_get_post(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostDetailResponse>, AppError> {
    let post = get_post(&state.db, post_id).await?;
    let liked_by_me = has_liked(&state.db, post_id, user_id).await?;
    Ok(Json(PostDetailResponse { post, liked_by_me }))
}

/// POST /api/v1/posts/:id/like
pub async fn handle_like_post(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikeState>, AppError> {
    Ok(Json(like_post(&state.db, post_id, user_id).await?))
}

/// DELETE /api/v1/posts/:id/like
pub async fn handle_unlike_post(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikeState>, AppError> {
    Ok(Json(unlike_post(&state.db, post_id, user_id).await?))
}

/// POST /api/v1/posts/:id/comments
pub async fn handle_add_comment(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
    Json(req): Json<ContentRequest>,
) -> Result<(StatusCode, Json<CommentRow>), AppError> {
    let content = validate_text("content", &req.content)?;
    let comment = add_comment(&state.db, post_id, user_id, content).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/posts/:id/comments, oldest first
pub async fn handle_list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<CommentRow>>, AppError> {
    Ok(Json(list_comments(&state.db, post_id).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Study sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<StudySessionRow>), AppError> {
    let topic = validate_text("topic", &req.topic)?;
    let session = create_study_session(&state.db, user_id, topic).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions, active sessions only
pub async fn handle_list_sessions(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<StudySessionRow>>, AppError> {
    Ok(Json(
        list_active_sessions(&state.db, page_size(page.limit)).await?,
    ))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StudySessionRow>, AppError> {
    Ok(Json(get_study_session(&state.db, session_id).await?))
}

/// POST /api/v1/sessions/:id/join
pub async fn handle_join_session(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StudySessionRow>, AppError> {
    Ok(Json(
        join_study_session(&state.db, session_id, user_id).await?,
    ))
}

/// POST /api/v1/sessions/:id/leave
pub async fn handle_leave_session(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StudySessionRow>, AppError> {
    Ok(Json(
        leave_study_session(&state.db, session_id, user_id).await?,
    ))
}
