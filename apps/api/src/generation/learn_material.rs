//! Learn material: flashcards plus a ten-question multiple-choice quiz for a topic.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::generation::pipeline::{generate_structured, prompt_input, GenerationError};
use crate::generation::prompts::{LEARN_MATERIAL_PERSONA, LEARN_MATERIAL_PROMPT_TEMPLATE};
use crate::generation::schema::{len_in, non_empty, Schema, SchemaViolation};
use crate::llm_client::prompts::{json_system, ACCURACY_INSTRUCTION};
use crate::llm_client::TextGenerator;

pub const FLASHCARD_COUNT: RangeInclusive<usize> = 4..=6;
pub const QUIZ_QUESTION_COUNT: usize = 10;
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LearnMaterial {
    pub flashcards: Vec<Flashcard>,
    pub quiz: Vec<QuizQuestion>,
}

impl Schema for QuizQuestion {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("question", &self.question)?;
        non_empty("answer", &self.answer)?;
        len_in("options", self.options.len(), OPTIONS_PER_QUESTION..=OPTIONS_PER_QUESTION)?;

        let mut seen = HashSet::new();
        for (i, option) in self.options.iter().enumerate() {
            non_empty(&format!("options[{i}]"), option)?;
            if !seen.insert(option.trim()) {
                return Err(SchemaViolation::new(
                    format!("options[{i}]"),
                    format!("duplicate option '{option}'"),
                ));
            }
        }

        if !seen.contains(self.answer.trim()) {
            return Err(SchemaViolation::new(
                "answer",
                format!("'{}' is not one of the options", self.answer),
            ));
        }
        Ok(())
    }
}

impl Schema for LearnMaterial {
    fn validate(&self) -> Result<(), SchemaViolation> {
        len_in("flashcards", self.flashcards.len(), FLASHCARD_COUNT)?;
        for (i, card) in self.flashcards.iter().enumerate() {
            non_empty(&format!("flashcards[{i}].question"), &card.question)?;
            non_empty(&format!("flashcards[{i}].answer"), &card.answer)?;
        }

        len_in("quiz", self.quiz.len(), QUIZ_QUESTION_COUNT..=QUIZ_QUESTION_COUNT)?;
        for (i, question) in self.quiz.iter().enumerate() {
            question.validate().map_err(|v| SchemaViolation {
                path: format!("quiz[{i}].{}", v.path),
                rule: v.rule,
            })?;
        }
        Ok(())
    }
}

/// Generates flashcards and a quiz for `topic`.
pub async fn generate_learn_material(
    topic: &str,
    llm: &dyn TextGenerator,
) -> Result<LearnMaterial, GenerationError> {
    let topic = prompt_input("topic", topic)?;
    let prompt = LEARN_MATERIAL_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{accuracy_instruction}", ACCURACY_INSTRUCTION);
    generate_structured(llm, &prompt, &json_system(LEARN_MATERIAL_PERSONA)).await
}
