//! Sequential tool execution with per-tool failure isolation.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::context::ExecutionContext;
use crate::kind::ToolKind;
use crate::registry::ToolRegistry;
use crate::tool::error_result;

/// Results keyed by tool identifier, in selection order.
pub type ToolResults = IndexMap<String, Value>;

/// Runs the selected tools one after another.
///
/// A tool that returns an error or panics gets an `{"error": ...}` slot and
/// the remaining tools still run.
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.registry.as_ref()
    }

    /// Execute `tools` in order against the same message and context.
    ///
    /// A progress notification goes out right before each tool runs.
    /// Identifiers that are not registered are skipped.
    pub async fn execute(
        &self,
        tools: &[String],
        message: &str,
        context: &ExecutionContext,
    ) -> ToolResults {
        let mut results = ToolResults::with_capacity(tools.len());

        for id in tools {
            if results.contains_key(id) {
                continue;
            }

            let Some(kind) = ToolKind::from_id(id) else {
                warn!(tool = %id, "Skipping unknown tool");
                continue;
            };
            let Some(tool) = self.registry.get_kind(kind) else {
                warn!(tool = %id, "Skipping unregistered tool");
                continue;
            };

            context.notify(&format!("Executing {}...", kind.display_name()));
            debug!(tool = %id, "Executing tool");

            let outcome = AssertUnwindSafe(tool.execute(message, context))
                .catch_unwind()
                .await;

            let value = match outcome {
                Ok(Ok(value)) => {
                    info!(tool = %id, "Tool completed");
                    value
                }
                Ok(Err(e)) => {
                    warn!(tool = %id, error = %e, "TOOL_FAILED");
                    error_result(format!("Failed to execute {}: {}", id, e))
                }
                Err(panic) => {
                    let reason = panic_message(panic.as_ref());
                    warn!(tool = %id, error = %reason, "TOOL_PANICKED");
                    error_result(format!("Failed to execute {}: {}", id, reason))
                }
            };

            results.insert(id.clone(), value);
        }

        results
    }
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
