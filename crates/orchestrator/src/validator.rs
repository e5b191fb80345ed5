//! Confidence and registry validation for tool selections.

use agent_tools::{ToolKind, ToolRegistry};
use tracing::{debug, info, warn};

use crate::selection::ToolSelection;

/// Normalizes any proposed selection into one that is safe to execute.
///
/// This is the only place tool identifiers are checked against the registry.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceValidator {
    min_confidence: f64,
}

impl ConfidenceValidator {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Validate a selection.
    ///
    /// - Below the threshold: conversation only, whatever was proposed.
    /// - Otherwise: unknown identifiers are dropped, order is kept; an empty
    ///   result becomes conversation only.
    pub fn validate(&self, selection: ToolSelection, registry: &ToolRegistry) -> ToolSelection {
        // Compare the clamped confidence; NaN normalizes to 0.0.
        let selection = selection.normalized();

        if selection.confidence < self.min_confidence {
            info!(
                proposed = ?selection.tools,
                confidence = selection.confidence,
                min_confidence = self.min_confidence,
                "LOW_CONFIDENCE_OVERRIDE"
            );
            return ToolSelection {
                tools: vec![ToolKind::Conversation.id().to_string()],
                confidence: selection.confidence,
                reasoning: Some(format!(
                    "low confidence ({:.2} < {:.2}), using conversation",
                    selection.confidence, self.min_confidence
                )),
            };
        }

        let ToolSelection {
            tools,
            confidence,
            reasoning,
        } = selection;

        let (valid, dropped): (Vec<String>, Vec<String>) =
            tools.into_iter().partition(|id| registry.has_tool(id));

        if !dropped.is_empty() {
            warn!(dropped = ?dropped, "Dropping unknown tools from selection");
        }

        if valid.is_empty() {
            debug!("No valid tools left, using conversation");
            return ToolSelection {
                tools: vec![ToolKind::Conversation.id().to_string()],
                confidence,
                reasoning: Some("no valid tools selected, using conversation".to_string()),
            };
        }

        ToolSelection {
            tools: valid,
            confidence,
            reasoning,
        }
    }
}
