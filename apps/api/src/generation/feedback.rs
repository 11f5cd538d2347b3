//! Quiz feedback: explains what a student got wrong and how to improve.
//!
//! A perfect attempt short-circuits to a fixed message without touching the model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generation::pipeline::{generate_structured, prompt_input, GenerationError};
use crate::generation::prompts::{QUIZ_FEEDBACK_PERSONA, QUIZ_FEEDBACK_PROMPT_TEMPLATE};
use crate::generation::schema::{len_in, non_empty, Schema, SchemaViolation};
use crate::llm_client::prompts::json_system;
use crate::llm_client::TextGenerator;
use crate::models::quiz::AnswerRecord;

pub const PERFECT_SCORE_MESSAGE: &str = "Excellent work! You answered all questions correctly. \
    You have a solid understanding of this topic.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionFeedback {
    pub question: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuizFeedback {
    pub summary: String,
    pub improvement_tips: Vec<String>,
    pub question_feedback: Vec<QuestionFeedback>,
}

impl QuizFeedback {
    pub fn perfect_score() -> Self {
        Self {
            summary: PERFECT_SCORE_MESSAGE.to_string(),
            improvement_tips: Vec::new(),
            question_feedback: Vec::new(),
        }
    }
}

impl Schema for QuizFeedback {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("summary", &self.summary)?;
        len_in("improvementTips", self.improvement_tips.len(), 1..=5)?;
        for (i, tip) in self.improvement_tips.iter().enumerate() {
            non_empty(&format!("improvementTips[{i}]"), tip)?;
        }
        for (i, entry) in self.question_feedback.iter().enumerate() {
            non_empty(&format!("questionFeedback[{i}].question"), &entry.question)?;
            non_empty(&format!("questionFeedback[{i}].explanation"), &entry.explanation)?;
        }
        Ok(())
    }
}

fn format_incorrect(answers: &[&AnswerRecord]) -> String {
    answers
        .iter()
        .map(|a| {
            format!(
                "- Question: \"{}\"\n  Student's Answer: \"{}\"\n  Correct Answer: \"{}\"",
                a.question, a.selected_answer, a.correct_answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Produces feedback for a finished quiz.
///
/// Only incorrect answers are sent to the model, and the reply must carry
/// exactly one `question_feedback` entry per incorrect answer. Correctness is
/// judged from the selected and correct answers, not the client's flag.
pub async fn analyze_quiz_results(
    topic: &str,
    answers: &[AnswerRecord],
    llm: &dyn TextGenerator,
) -> Result<QuizFeedback, GenerationError> {
    let topic = prompt_input("topic", topic)?;
    let incorrect: Vec<&AnswerRecord> = answers.iter().filter(|a| !a.is_answer_correct()).collect();

    if incorrect.is_empty() {
        debug!("All {} answers correct for '{topic}', skipping model call", answers.len());
        return Ok(QuizFeedback::perfect_score());
    }

    let prompt = QUIZ_FEEDBACK_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{incorrect_count}", &incorrect.len().to_string())
        .replace("{incorrect_answers}", &format_incorrect(&incorrect));

    let feedback: QuizFeedback =
        generate_structured(llm, &prompt, &json_system(QUIZ_FEEDBACK_PERSONA)).await?;

    len_in(
        "questionFeedback",
        feedback.question_feedback.len(),
        incorrect.len()..=incorrect.len(),
    )?;

    Ok(feedback)
}
