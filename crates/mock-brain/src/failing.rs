//! Brains that fail on purpose.

use async_trait::async_trait;
use brain_core::{Brain, BrainError};

/// A brain whose every completion fails with `BrainError::Unavailable`.
#[derive(Debug, Clone)]
pub struct FailingBrain {
    reason: String,
}

impl FailingBrain {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for FailingBrain {
    fn default() -> Self {
        Self::new("provider offline")
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, BrainError> {
        Err(BrainError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}

/// A brain that panics inside `complete`.
///
/// Used to check that callers survive a provider that blows up instead of
/// returning an error.
#[derive(Debug, Clone, Default)]
pub struct PanickingBrain;

#[async_trait]
impl Brain for PanickingBrain {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, BrainError> {
        panic!("PanickingBrain was asked for a completion");
    }

    fn name(&self) -> &str {
        "PanickingBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::panic::AssertUnwindSafe;

    #[tokio::test]
    async fn test_failing_brain_errors() {
        let brain = FailingBrain::new("down for maintenance");
        let err = brain.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, BrainError::Unavailable(ref r) if r == "down for maintenance"));
        assert!(!brain.is_ready().await);
    }

    #[tokio::test]
    async fn test_panicking_brain_panics() {
        let brain = PanickingBrain;
        let outcome = AssertUnwindSafe(brain.complete("s", "u")).catch_unwind().await;
        assert!(outcome.is_err());
    }
}
