//! The terminal output of a routing call.

use agent_tools::{ExecutionContext, ToolResults};
use serde::Serialize;

use crate::combiner::CombinedResult;

/// Timing and recovery details for one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseMetadata {
    /// Wall-clock seconds from entry to envelope creation.
    pub execution_time: f64,

    /// Set when the answer came from the fallback chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,

    /// The failure that triggered the fallback chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything the caller gets back from [`crate::Orchestrator::handle`].
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    /// The message as received.
    pub original_message: String,
    /// Tools that ran, in order.
    pub tools_used: Vec<String>,
    /// Per-tool payloads, in order.
    pub raw_results: ToolResults,
    /// Pass-through, combined or apology payload.
    pub formatted_result: CombinedResult,
    /// The caller's context values.
    pub context: ExecutionContext,
    pub metadata: ResponseMetadata,
}

impl ResponseEnvelope {
    /// Whether the fallback chain produced this envelope.
    pub fn is_fallback(&self) -> bool {
        self.metadata.fallback.unwrap_or(false)
    }

    /// Serialize to a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_serialization() {
        let mut raw_results = ToolResults::new();
        raw_results.insert("expense".to_string(), json!({"message": "Added"}));

        let envelope = ResponseEnvelope {
            original_message: "$5 coffee".to_string(),
            tools_used: vec!["expense".to_string()],
            raw_results,
            formatted_result: CombinedResult::Single(json!({"message": "Added"})),
            context: ExecutionContext::new().with_value("session", "s-1"),
            metadata: ResponseMetadata {
                execution_time: 0.25,
                fallback: None,
                error: None,
            },
        };

        assert!(!envelope.is_fallback());
        assert_eq!(
            envelope.to_json(),
            json!({
                "original_message": "$5 coffee",
                "tools_used": ["expense"],
                "raw_results": {"expense": {"message": "Added"}},
                "formatted_result": {"message": "Added"},
                "context": {"session": "s-1"},
                "metadata": {"execution_time": 0.25}
            })
        );
    }

    #[test]
    fn test_fallback_metadata_serialization() {
        let metadata = ResponseMetadata {
            execution_time: 1.0,
            fallback: Some(true),
            error: Some("routing panicked: boom".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            json!({"execution_time": 1.0, "fallback": true, "error": "routing panicked: boom"})
        );
    }
}
