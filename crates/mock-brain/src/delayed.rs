//! Latency wrapper around another provider.

use std::sync::Arc;
use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError};
use tokio::time::sleep;

/// Sleeps before delegating every completion to `inner`.
///
/// Stands in for a slow provider when checking envelope timing.
pub struct DelayedBrain {
    inner: Arc<dyn Brain>,
    delay: Duration,
}

impl DelayedBrain {
    pub fn new(inner: Arc<dyn Brain>, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn with_millis(inner: Arc<dyn Brain>, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Brain for DelayedBrain {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, BrainError> {
        sleep(self.delay).await;
        self.inner.complete(system_prompt, user_prompt).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
