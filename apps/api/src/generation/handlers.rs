use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::feedback::{analyze_quiz_results, QuizFeedback};
use crate::generation::learn_material::{generate_learn_material, LearnMaterial};
use crate::generation::mindmap::{generate_mindmap, MindMapNode};
use crate::generation::resources::{generate_study_resources, StudyResources};
use crate::generation::roadmap::{generate_study_roadmap, StudyRoadmap};
use crate::generation::tutor::{ask_tutor, TutorReply};
use crate::models::quiz::AnswerRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGoalRequest {
    pub study_goal: String,
}

#[derive(Debug, Deserialize)]
pub struct TutorRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizFeedbackRequest {
    pub topic: String,
    pub answers: Vec<AnswerRecord>,
}

/// POST /api/v1/generate/learn-material
pub async fn handle_learn_material(
    State(state): State<AppState>,
    Json(req): Json<TopicRequest>,
) -> Result<Json<LearnMaterial>, AppError> {
    generate_learn_material(&req.topic, state.llm.as_ref())
        .await
        .map(Json)
        .map_err(|e| AppError::generation("Failed to generate learning materials.", e))
}

/// POST /api/v1/generate/mindmap
pub async fn handle_mindmap(
    State(state): State<AppState>,
    Json(req): Json<TopicRequest>,
) -> Result<Json<MindMapNode>, AppError> {
    generate_mindmap(&req.topic, state.llm.as_ref())
        .await
        .map(Json)
        .map_err(|e| AppError::generation("Failed to generate mind map.", e))
}

/// POST /api/v1/generate/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Json(req): Json<TopicRequest>,
) -> Result<Json<StudyRoadmap>, AppError> {
    generate_study_roadmap(&req.topic, state.llm.as_ref())
        .await
        .map(Json)
        .map_err(|e| AppError::generation("Failed to generate study roadmap.", e))
}

/// POST /api/v1/generate/resources
pub async fn handle_resources(
    State(state): State<AppState>,
    Json(req): Json<StudyGoalRequest>,
) -> Result<Json<StudyResources>, AppError> {
    generate_study_resources(
        &req.study_goal,
        state.llm.as_ref(),
        state.videos.as_ref(),
        state.articles.as_ref(),
    )
    .await
    .map(Json)
    .map_err(|e| AppError::generation("Failed to generate study resources.", e))
}

/// POST /api/v1/generate/tutor
pub async fn handle_tutor(
    State(state): State<AppState>,
    Json(req): Json<TutorRequest>,
) -> Result<Json<TutorReply>, AppError> {
    ask_tutor(&req.query, state.llm.as_ref())
        .await
        .map(Json)
        .map_err(|e| AppError::generation("Failed to get a response from the tutor.", e))
}

/// POST /api/v1/generate/quiz-feedback
pub async fn handle_quiz_feedback(
    State(state): State<AppState>,
    Json(req): Json<QuizFeedbackRequest>,
) -> Result<Json<QuizFeedback>, AppError> {
    analyze_quiz_results(&req.topic, &req.answers, state.llm.as_ref())
        .await
        .map(Json)
        .map_err(|e| AppError::generation("Failed to analyze quiz results.", e))
}
