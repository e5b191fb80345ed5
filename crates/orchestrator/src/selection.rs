//! Tool selection produced by the classifiers.

use agent_tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Confidence assumed when a model reply omits it.
pub const DEFAULT_MODEL_CONFIDENCE: f64 = 0.5;

fn default_confidence() -> f64 {
    DEFAULT_MODEL_CONFIDENCE
}

/// Which tools should handle a message, with supporting metadata.
///
/// `tools` is an ordered set: order is execution order, duplicates are
/// removed by [`ToolSelection::new`] and [`ToolSelection::normalized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSelection {
    /// Tool identifiers, in execution order.
    pub tools: Vec<String>,

    /// Confidence in [0, 1].
    #[serde(default = "default_confidence")]
    pub confidence: f64,

    /// Why these tools were picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl ToolSelection {
    /// Create a selection. Duplicates are dropped and confidence is clamped.
    pub fn new<I, S>(tools: I, confidence: f64, reasoning: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tools: tools.into_iter().map(Into::into).collect(),
            confidence,
            reasoning,
        }
        .normalized()
    }

    /// The neutral default: conversation only.
    pub fn conversation(reasoning: impl Into<String>) -> Self {
        Self {
            tools: vec![ToolKind::Conversation.id().to_string()],
            confidence: 1.0,
            reasoning: Some(reasoning.into()),
        }
    }

    /// Drop duplicate identifiers (keeping first occurrence) and clamp confidence.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.tools.len());
        self.tools.retain(|tool| {
            if seen.contains(tool) {
                false
            } else {
                seen.push(tool.clone());
                true
            }
        });
        self.confidence = if self.confidence.is_nan() {
            0.0
        } else {
            self.confidence.clamp(0.0, 1.0)
        };
        self
    }

    /// Check if the selection names no tools.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Check if the selection contains an identifier.
    pub fn contains(&self, id: &str) -> bool {
        self.tools.iter().any(|t| t == id)
    }

    /// Check if this is exactly the conversation default.
    pub fn is_conversation_only(&self) -> bool {
        self.tools.len() == 1 && self.tools[0] == ToolKind::Conversation.id()
    }

    /// Get a human-readable description of this selection.
    pub fn description(&self) -> String {
        format!(
            "[{}] (confidence {:.2}){}",
            self.tools.join(", "),
            self.confidence,
            self.reasoning
                .as_deref()
                .map(|r| format!(": {}", r))
                .unwrap_or_default()
        )
    }
}
