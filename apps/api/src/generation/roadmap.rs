//! Study roadmap: Beginner → Intermediate → Advanced levels of timed steps.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generation::pipeline::{generate_structured, prompt_input, GenerationError};
use crate::generation::prompts::{ROADMAP_PERSONA, ROADMAP_PROMPT_TEMPLATE};
use crate::generation::schema::{http_url, len_in, non_empty, Schema, SchemaViolation};
use crate::llm_client::prompts::{json_system, ACCURACY_INSTRUCTION};
use crate::llm_client::TextGenerator;

pub const RESOURCES_PER_STEP: RangeInclusive<usize> = 1..=2;

/// Ordering follows learning progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoadmapStep {
    pub subtopic: String,
    pub resources: Vec<String>,
    pub time: String,
    pub milestone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoadmapLevel {
    pub level: Level,
    pub steps: Vec<RoadmapStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudyRoadmap {
    pub topic: String,
    pub roadmap: Vec<RoadmapLevel>,
}

impl StudyRoadmap {
    pub fn step_count(&self) -> usize {
        self.roadmap.iter().map(|l| l.steps.len()).sum()
    }
}

impl Schema for StudyRoadmap {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("topic", &self.topic)?;
        if self.roadmap.is_empty() {
            return Err(SchemaViolation::new("roadmap", "must contain at least one level"));
        }

        let mut previous: Option<Level> = None;
        for (li, level) in self.roadmap.iter().enumerate() {
            let path = format!("roadmap[{li}]");
            if previous.is_some_and(|p| p >= level.level) {
                return Err(SchemaViolation::new(
                    format!("{path}.level"),
                    format!("{:?} is repeated or out of order", level.level),
                ));
            }
            previous = Some(level.level);

            if level.steps.is_empty() {
                return Err(SchemaViolation::new(
                    format!("{path}.steps"),
                    "must contain at least one step",
                ));
            }
            for (si, step) in level.steps.iter().enumerate() {
                let path = format!("{path}.steps[{si}]");
                non_empty(&format!("{path}.subtopic"), &step.subtopic)?;
                non_empty(&format!("{path}.time"), &step.time)?;
                non_empty(&format!("{path}.milestone"), &step.milestone)?;
                len_in(
                    &format!("{path}.resources"),
                    step.resources.len(),
                    RESOURCES_PER_STEP,
                )?;
                for (ri, url) in step.resources.iter().enumerate() {
                    http_url(&format!("{path}.resources[{ri}]"), url)?;
                }
            }
        }
        Ok(())
    }
}

/// Generates a levelled roadmap for `topic`.
pub async fn generate_study_roadmap(
    topic: &str,
    llm: &dyn TextGenerator,
) -> Result<StudyRoadmap, GenerationError> {
    let topic = prompt_input("topic", topic)?;
    let prompt = ROADMAP_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{accuracy_instruction}", ACCURACY_INSTRUCTION);
    let roadmap: StudyRoadmap =
        generate_structured(llm, &prompt, &json_system(ROADMAP_PERSONA)).await?;
    info!(
        "Roadmap for '{topic}': {} levels, {} steps",
        roadmap.roadmap.len(),
        roadmap.step_count()
    );
    Ok(roadmap)
}
