use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One answered quiz question as the client reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl AnswerRecord {
    /// Whether the selected answer matches the correct one, ignoring surrounding whitespace.
    pub fn is_answer_correct(&self) -> bool {
        self.selected_answer.trim() == self.correct_answer.trim()
    }

    /// Replaces the client-reported `is_correct` with the server's judgement.
    pub fn graded(mut self) -> Self {
        self.is_correct = self.is_answer_correct();
        self
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttemptRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub answers: Json<Vec<AnswerRecord>>,
    pub score: i32,
    pub total: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub user_id: Uuid,
    pub username: String,
    pub photo_url: Option<String>,
    pub points: i64,
    pub attempts: i64,
}
