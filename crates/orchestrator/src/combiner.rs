//! Merging per-tool results into one payload.

use agent_tools::ToolResults;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The formatted result handed back to the caller.
///
/// Serializes as the bare tool payload for a single tool, or as a
/// `{"type": ..., ...}` object otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CombinedResult {
    /// Exactly one tool ran; its payload unchanged.
    Single(Value),
    /// Synthesized payload.
    Synthesized(SynthesizedResult),
}

/// Payloads the pipeline builds itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SynthesizedResult {
    /// Several tools ran.
    Combined {
        results: ToolResults,
        summary: String,
    },
    /// Nothing could answer; a polite apology.
    Error { response: String },
}

impl CombinedResult {
    /// Build the apology payload.
    pub fn error(response: impl Into<String>) -> Self {
        Self::Synthesized(SynthesizedResult::Error {
            response: response.into(),
        })
    }

    /// The summary, for combined results.
    pub fn summary(&self) -> Option<&str> {
        match self {
            Self::Synthesized(SynthesizedResult::Combined { summary, .. }) => Some(summary),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Synthesized(SynthesizedResult::Error { .. }))
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Combine tool results.
///
/// One result passes through untouched. Several results are wrapped with a
/// summary built from each result's `message` field, else its `response`
/// field, in order, joined by single spaces.
pub fn combine(mut results: ToolResults) -> CombinedResult {
    if results.len() == 1 {
        if let Some((_, value)) = results.pop() {
            return CombinedResult::Single(value);
        }
    }

    let summary = summarize(&results);
    CombinedResult::Synthesized(SynthesizedResult::Combined { results, summary })
}

fn summarize(results: &ToolResults) -> String {
    results
        .values()
        .filter_map(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| value.get("response").and_then(Value::as_str))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
