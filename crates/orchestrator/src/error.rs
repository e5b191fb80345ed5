//! Error types for orchestrator operations.

use agent_tools::ToolError;
use thiserror::Error;

/// Errors that can occur inside the routing pipeline.
///
/// None of these escape [`crate::Orchestrator::handle`]; they are recovered
/// locally or turned into fallback envelopes.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The message was empty or whitespace only.
    #[error("message is empty")]
    EmptyMessage,

    /// Model classification failed (provider error or unusable reply).
    #[error("classification failed: {0}")]
    Classification(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No selected tool produced a result.
    #[error("no tools were executed")]
    NoHandlers,

    /// A pipeline stage panicked.
    #[error("{stage} panicked: {message}")]
    Panicked { stage: &'static str, message: String },

    /// Tool registry or tool failure.
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),
}
