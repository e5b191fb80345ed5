//! Tool trait definition.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::context::ExecutionContext;
use crate::error::ToolError;

/// Trait for capability handlers dispatched by the router.
///
/// The payload shape is up to the handler. Exposing a `message` or
/// `response` string field lets the combiner quote it in multi-tool
/// summaries.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Human-readable description of what the tool does.
    ///
    /// Shown to the classifier model next to the tool identifier.
    fn description(&self) -> &str;

    /// Handle the user's message.
    async fn execute(&self, message: &str, context: &ExecutionContext) -> Result<Value, ToolError>;
}

/// Build the `{"error": ...}` payload that stands in for a failed tool.
pub fn error_result(error: impl Into<String>) -> Value {
    json!({ "error": error.into() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_result_shape() {
        let value = error_result("Failed to execute search: timeout");
        assert_eq!(value, json!({"error": "Failed to execute search: timeout"}));
    }
}
