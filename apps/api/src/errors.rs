use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthFailure;
use crate::generation::pipeline::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Auth failure: {0}")]
    Auth(#[from] AuthFailure),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// `message` is what the user sees; `source` is logged.
    #[error("{message} ({source})")]
    Generation {
        message: &'static str,
        #[source]
        source: GenerationError,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps a generation failure with the user-facing message for the operation.
    /// Bad input stays a validation error.
    pub fn generation(message: &'static str, source: GenerationError) -> Self {
        if source.is_input_error() {
            return AppError::Validation(source.to_string());
        }
        AppError::Generation { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Auth(failure) => {
                (failure.status(), failure.code(), failure.message().to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Generation { message, source } => {
                tracing::error!("Generation failed: {source}");
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", message.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generation_failure_hides_cause() {
        let err = AppError::generation(
            "Failed to generate learning materials.",
            GenerationError::Upstream(LlmError::EmptyContent),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");
        assert_eq!(body["error"]["message"], "Failed to generate learning materials.");
    }

    #[tokio::test]
    async fn test_blank_input_is_validation_error() {
        let err = AppError::generation(
            "Failed to generate study roadmap.",
            GenerationError::EmptyInput { field: "topic" },
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "topic cannot be empty");
    }

    #[tokio::test]
    async fn test_auth_failure_uses_fixed_message() {
        let response = AppError::from(AuthFailure::EmailAlreadyInUse).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "email-already-in-use");
        assert_eq!(body["error"]["message"], "This email is already registered.");
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let response = AppError::NotFound("Post x not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Post x not found");
    }
}
