//! Error types for tool operations.

use brain_core::BrainError;
use thiserror::Error;

/// Errors that can occur while building the registry or running a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The registry was built without a conversation handler.
    #[error("Conversation tool is required but was not registered or is disabled")]
    MissingConversation,

    /// General execution error.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Provider error while producing a reply.
    #[error("Brain error: {0}")]
    Brain(#[from] BrainError),
}
