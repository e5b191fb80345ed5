//! Progress notification sinks.

/// Receives human-readable status updates while a message is processed.
///
/// Abstracted to support different observers (chat typing bubbles, CLIs,
/// tests). Notifications are fire-and-forget.
pub trait ProgressSink: Send + Sync {
    /// Report a status line, e.g. `"Executing Search..."`.
    fn notify(&self, status: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, status: &str) {
        self(status)
    }
}

/// A sink that discards every notification.
#[derive(Debug, Clone, Default)]
pub struct NoOpProgress;

impl ProgressSink for NoOpProgress {
    fn notify(&self, _status: &str) {}
}

/// A sink that logs every notification at info level.
#[derive(Debug, Clone, Default)]
pub struct LoggingProgress;

impl ProgressSink for LoggingProgress {
    fn notify(&self, status: &str) {
        tracing::info!("[progress] {}", status);
    }
}
