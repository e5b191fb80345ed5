//! A provider that answers with the prompt it was given.

use async_trait::async_trait;
use brain_core::{Brain, BrainError};

/// Replies with the user prompt, optionally prefixed.
///
/// Behind a conversation tool this makes replies predictable. Behind a
/// classifier it never yields JSON, so it drives the keyword fallback.
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    prefix: String,
}

impl EchoBrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Echo with `prefix` in front, e.g. `EchoBrain::with_prefix("You said: ")`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl Brain for EchoBrain {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, BrainError> {
        Ok(format!("{}{}", self.prefix, user_prompt))
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}
