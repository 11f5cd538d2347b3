// Shared prompt fragments.
// Each generator keeps its own templates in generation/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every content prompt.
pub const ACCURACY_INSTRUCTION: &str = "\
    Be precise and avoid hallucination. \
    Ensure the content is accurate and directly related to the provided topic. \
    If you are unsure about a fact, leave it out rather than guess.";

/// Builds a system prompt from a persona line plus the JSON-only rules.
pub fn json_system(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_SYSTEM}")
}
