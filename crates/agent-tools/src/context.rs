//! Per-message execution context shared with every handler.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::progress::ProgressSink;

/// Caller-supplied context for one routing call.
///
/// Holds arbitrary key/value pairs (tenant, session, locale, ...) and an
/// optional progress sink. Handlers may read it; nothing written by one
/// handler is visible to the next, since every handler gets a shared borrow.
#[derive(Clone, Default, Serialize)]
pub struct ExecutionContext {
    #[serde(flatten)]
    values: Map<String, Value>,
    #[serde(skip)]
    progress: Option<Arc<dyn ProgressSink>>,
}

impl ExecutionContext {
    /// Create an empty context with no progress sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from an existing JSON object.
    pub fn from_values(values: Map<String, Value>) -> Self {
        Self {
            values,
            progress: None,
        }
    }

    /// Add a key/value pair.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Attach a progress sink.
    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Arc::new(sink));
        self
    }

    /// Attach an already shared progress sink.
    pub fn with_shared_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Look up a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// All caller-supplied values.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Whether a progress sink is attached.
    pub fn has_progress(&self) -> bool {
        self.progress.is_some()
    }

    /// Send a status line to the progress sink, if there is one.
    pub fn notify(&self, status: &str) {
        if let Some(sink) = &self.progress {
            sink.notify(status);
        }
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("values", &self.values)
            .field("has_progress", &self.progress.is_some())
            .finish()
    }
}
