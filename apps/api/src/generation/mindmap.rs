//! Mindmaps: A recursive tree of `{id, title, children}` nodes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generation::pipeline::{generate_structured, prompt_input, GenerationError};
use crate::generation::prompts::{MINDMAP_PERSONA, MINDMAP_PROMPT_TEMPLATE};
use crate::generation::schema::{non_empty, Schema, SchemaViolation};
use crate::llm_client::prompts::{json_system, ACCURACY_INSTRUCTION};
use crate::llm_client::TextGenerator;

/// Root is depth 0.
pub const MAX_DEPTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MindMapNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MindMapNode::node_count).sum::<usize>()
    }

    /// Depth of the deepest leaf below `self` (a leaf has depth 0).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    fn check<'a>(
        &'a self,
        path: &str,
        depth: usize,
        ids: &mut HashSet<&'a str>,
    ) -> Result<(), SchemaViolation> {
        if depth > MAX_DEPTH {
            return Err(SchemaViolation::new(
                path,
                format!("nested deeper than {MAX_DEPTH} levels"),
            ));
        }
        non_empty(&format!("{path}.id"), &self.id)?;
        non_empty(&format!("{path}.title"), &self.title)?;
        if !ids.insert(self.id.trim()) {
            return Err(SchemaViolation::new(
                format!("{path}.id"),
                format!("duplicate node id '{}'", self.id),
            ));
        }
        for (i, child) in self.children.iter().enumerate() {
            child.check(&format!("{path}.children[{i}]"), depth + 1, ids)?;
        }
        Ok(())
    }
}

impl Schema for MindMapNode {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.children.is_empty() {
            return Err(SchemaViolation::new(
                "root.children",
                "a mindmap needs at least one branch",
            ));
        }
        let mut ids = HashSet::new();
        self.check("root", 0, &mut ids)
    }
}

/// Generates a mindmap rooted at `topic`.
pub async fn generate_mindmap(
    topic: &str,
    llm: &dyn TextGenerator,
) -> Result<MindMapNode, GenerationError> {
    let topic = prompt_input("topic", topic)?;
    let prompt = MINDMAP_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{accuracy_instruction}", ACCURACY_INSTRUCTION);
    let mindmap: MindMapNode =
        generate_structured(llm, &prompt, &json_system(MINDMAP_PERSONA)).await?;
    info!(
        "Mindmap for '{topic}': {} nodes, depth {}",
        mindmap.node_count(),
        mindmap.depth()
    );
    Ok(mindmap)
}
