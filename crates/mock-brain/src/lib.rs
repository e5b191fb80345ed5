//! Mock brain implementations for exercising the intent router.
//!
//! This crate provides mock implementations of the `Brain` trait for testing:
//! - `EchoBrain` - Echoes the user prompt back
//! - `ScriptedBrain` - Always replies with a fixed text and counts calls
//! - `FailingBrain` - Always returns an error
//! - `PanickingBrain` - Panics on every call
//! - `DelayedBrain` - Wraps another brain with artificial delay
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, ScriptedBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = ScriptedBrain::new(r#"{"tools": ["search"], "confidence": 0.9}"#);
//!
//!     let reply = brain.complete("classify", "find rust docs").await?;
//!     assert!(reply.contains("search"));
//!     assert_eq!(brain.calls(), 1);
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod failing;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError};

pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use failing::{FailingBrain, PanickingBrain};
pub use scripted::ScriptedBrain;
