// Structured generation: every content type is a prompt template, a target
// type implementing `Schema`, and a call through `pipeline::generate_structured`.
// All LLM calls go through llm_client via the `TextGenerator` trait.

pub mod feedback;
pub mod handlers;
pub mod learn_material;
pub mod mindmap;
pub mod pipeline;
pub mod prompts;
pub mod resources;
pub mod roadmap;
pub mod schema;
pub mod tutor;
