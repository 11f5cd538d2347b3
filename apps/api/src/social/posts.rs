//! Posts, likes and comments.

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::social::{CommentRow, PostRow};

/// Result of a like/unlike: whether the caller now likes the post, and the new count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub liked: bool,
    pub like_count: i64,
}

pub async fn create_post(pool: &PgPool, user_id: Uuid, content: &str) -> Result<PostRow, AppError> {
    let post = sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (id, user_id, content, like_count, comment_count)
        VALUES ($1, $2, $3, 0, 0)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    info!("User {user_id} created post {}", post.id);
    Ok(post)
}

pub async fn list_posts(pool: &PgPool, limit: i64) -> Result<Vec<PostRow>, AppError> {
    let posts = sqlx::query_as::<_, PostRow>(
        "SELECT * FROM posts ORDER BY created_at DESC, id LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(posts)
}

pub async fn get_post(pool: &PgPool, post_id: Uuid) -> Result<PostRow, AppError> {
    sqlx::query_as::<_, PostRow>("SELECT * FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))
}

/// Whether `user_id` currently likes `post_id`.
pub async fn has_liked(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
    let liked: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM post_likes WHERE post_id = $1 AND user_id = $2)",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(liked)
}

/// Records a like and bumps `like_count` in one transaction.
/// Liking twice is a no-op: the unique (post, user) pair absorbs the second insert.
pub async fn like_post(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<LikeState, AppError> {
    let mut tx = pool.begin().await?;

    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;
    if !exists {
        return Err(AppError::NotFound(format!("Post {post_id} not found")));
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO post_likes (id, post_id, user_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (post_id, user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let like_count: i64 = if inserted == 1 {
        sqlx::query_scalar(
            "UPDATE posts SET like_count = like_count + 1 WHERE id = $1 RETURNING like_count",
        )
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?
    } else {
        sqlx::query_scalar("SELECT like_count FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?
    };

    tx.commit().await?;

    Ok(LikeState {
        liked: true,
        like_count,
    })
}

/// Removes a like and decrements `like_count` in one transaction. Unliking a
/// post the caller never liked leaves the count untouched.
pub async fn unlike_post(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<LikeState, AppError> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let like_count: Option<i64> = if deleted == 1 {
        sqlx::query_scalar(
            "UPDATE posts SET like_count = GREATEST(like_count - 1, 0) WHERE id = $1 RETURNING like_count",
        )
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await?
    } else {
        sqlx::query_scalar("SELECT like_count FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?
    };

    let like_count =
        like_count.ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    tx.commit().await?;

    Ok(LikeState {
        liked: false,
        like_count,
    })
}

/// Adds a comment and bumps `comment_count` in one transaction.
pub async fn add_comment(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<CommentRow, AppError> {
    let mut tx = pool.begin().await?;

    let bumped: Option<i64> = sqlx::query_scalar(
        "UPDATE posts SET comment_count = comment_count + 1 WHERE id = $1 RETURNING comment_count",
    )
    .bind(post_id)
    .fetch_optional(&mut *tx)
    .await?;
    if bumped.is_none() {
        return Err(AppError::NotFound(format!("Post {post_id} not found")));
    }

    let comment = sqlx::query_as::<_, CommentRow>(
        r#"
        INSERT INTO post_comments (id, post_id, user_id, content)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(comment)
}

/// Comments on a post, oldest first.
pub async fn list_comments(pool: &PgPool, post_id: Uuid) -> Result<Vec<CommentRow>, AppError> {
    // 404 for a missing post rather than an empty list
    get_post(pool, post_id).await?;

    let comments = sqlx::query_as::<_, CommentRow>(
        "SELECT * FROM post_comments WHERE post_id = $1 ORDER BY created_at ASC, id",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;
    Ok(comments)
}
