//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;

/// A language-model provider that turns a prompt into raw text.
///
/// Implementations own their transport, retry and timeout policy; callers
/// only see the final text or an error. The trait is object-safe and is
/// usually shared as `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Complete a prompt.
    ///
    /// # Arguments
    ///
    /// * `system_prompt` - Instructions for the model.
    /// * `user_prompt` - The user-facing input.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, BrainError>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;

    /// Check if the provider is ready to take requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
