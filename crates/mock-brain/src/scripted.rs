//! Scripted brain implementation - replies with a canned text.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use brain_core::{Brain, BrainError};

/// A brain that always returns the same reply and counts how often it was asked.
///
/// The call counter lets tests assert that a code path never reached the model.
#[derive(Debug, Default)]
pub struct ScriptedBrain {
    reply: String,
    calls: AtomicUsize,
}

impl ScriptedBrain {
    /// Create a brain that answers every prompt with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completions requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Brain for ScriptedBrain {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, BrainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}
