//! The structured generation pipeline: prompt → model text → typed value → validation.
//!
//! Generation fails closed. Output that does not deserialize into the target
//! type, or deserializes but breaks a `Schema` rule, is an error; no partial
//! value ever reaches a caller.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::generation::schema::{Schema, SchemaViolation};
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};

/// Longest free-text input accepted by any generator.
pub const MAX_INPUT_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("{field} exceeds {max} characters")]
    InputTooLong { field: &'static str, max: usize },

    #[error("Upstream generator failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("Output does not match the target shape: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Output violates schema: {0}")]
    Schema(#[from] SchemaViolation),
}

impl GenerationError {
    /// True when the caller supplied bad input, as opposed to the model misbehaving.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GenerationError::EmptyInput { .. } | GenerationError::InputTooLong { .. }
        )
    }
}

/// Trims a user-supplied string and checks it is usable as prompt input.
pub fn prompt_input<'a>(field: &'static str, value: &'a str) -> Result<&'a str, GenerationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GenerationError::EmptyInput { field });
    }
    if value.chars().count() > MAX_INPUT_CHARS {
        return Err(GenerationError::InputTooLong {
            field,
            max: MAX_INPUT_CHARS,
        });
    }
    Ok(value)
}

/// Parses raw model text into `T` and validates it.
pub fn parse_validated<T>(text: &str) -> Result<T, GenerationError>
where
    T: DeserializeOwned + Schema,
{
    let value: T = serde_json::from_str(strip_json_fences(text))?;
    value.validate()?;
    Ok(value)
}

/// Runs one structured-output call. The prompt must describe the JSON shape of `T`.
pub async fn generate_structured<T>(
    llm: &dyn TextGenerator,
    prompt: &str,
    system: &str,
) -> Result<T, GenerationError>
where
    T: DeserializeOwned + Schema,
{
    let text = llm.complete(prompt, system).await?;
    debug!("Model returned {} bytes", text.len());

    parse_validated(&text).map_err(|e| {
        let target = std::any::type_name::<T>();
        warn!(
            "Rejected {} output: {e}",
            target.rsplit("::").next().unwrap_or(target)
        );
        e
    })
}
