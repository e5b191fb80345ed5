//! Conversational reply tool backed by a language model.

use std::sync::Arc;

use async_trait::async_trait;
use brain_core::Brain;
use serde_json::{json, Value};
use tracing::debug;

use crate::context::ExecutionContext;
use crate::error::ToolError;
use crate::tool::Tool;

/// System prompt used for conversational replies.
pub const DEFAULT_CONVERSATION_PROMPT: &str = "You are a helpful assistant. \
Answer the user's message directly and concisely. If the request needs data \
you do not have, say so plainly.";

/// Conversation tool that forwards the message to a [`Brain`].
///
/// # Output
///
/// ```json
/// {"response": "<model reply>"}
/// ```
pub struct ConversationTool {
    brain: Arc<dyn Brain>,
    system_prompt: String,
}

impl ConversationTool {
    /// Create a conversation tool with the default prompt.
    pub fn new(brain: Arc<dyn Brain>) -> Self {
        Self::with_prompt(brain, DEFAULT_CONVERSATION_PROMPT)
    }

    /// Create a conversation tool with a custom system prompt.
    pub fn with_prompt(brain: Arc<dyn Brain>, system_prompt: impl Into<String>) -> Self {
        Self {
            brain,
            system_prompt: system_prompt.into(),
        }
    }
}

#[async_trait]
impl Tool for ConversationTool {
    fn description(&self) -> &str {
        "General conversation, explanations, questions, and requests to \
         compose or send messages, emails and reports."
    }

    async fn execute(
        &self,
        message: &str,
        _context: &ExecutionContext,
    ) -> Result<Value, ToolError> {
        debug!("Conversation reply via {}", self.brain.name());
        let reply = self.brain.complete(&self.system_prompt, message).await?;
        Ok(json!({ "response": reply.trim() }))
    }
}
