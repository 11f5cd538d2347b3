//! AI tutor: answers a student's question, optionally with a mindmap.

use serde::{Deserialize, Serialize};

use crate::generation::mindmap::MindMapNode;
use crate::generation::pipeline::{generate_structured, prompt_input, GenerationError};
use crate::generation::prompts::{TUTOR_PERSONA, TUTOR_PROMPT_TEMPLATE};
use crate::generation::schema::{non_empty, Schema, SchemaViolation};
use crate::llm_client::prompts::{json_system, ACCURACY_INSTRUCTION};
use crate::llm_client::TextGenerator;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TutorReply {
    pub response: String,
    #[serde(default)]
    pub mindmap: Option<MindMapNode>,
}

impl Schema for TutorReply {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("response", &self.response)?;
        if let Some(mindmap) = &self.mindmap {
            mindmap.validate().map_err(|v| SchemaViolation {
                path: format!("mindmap.{}", v.path),
                rule: v.rule,
            })?;
        }
        Ok(())
    }
}

pub async fn ask_tutor(query: &str, llm: &dyn TextGenerator) -> Result<TutorReply, GenerationError> {
    let query = prompt_input("query", query)?;
    let prompt = TUTOR_PROMPT_TEMPLATE
        .replace("{query}", query)
        .replace("{accuracy_instruction}", ACCURACY_INSTRUCTION);
    generate_structured(llm, &prompt, &json_system(TUTOR_PERSONA)).await
}
