//! Capability handler registry and execution for the intent router.
//!
//! A handler ("tool") takes the user's message plus an [`ExecutionContext`]
//! and returns an arbitrary JSON payload. Handlers belong to a closed set of
//! kinds ([`ToolKind`]); a [`ToolRegistry`] maps each enabled kind to one
//! handler instance and is never mutated after it is built.
//!
//! # Architecture
//!
//! ```text
//! EnabledTools ──► ToolRegistry::builder ──► ToolRegistry (immutable)
//!                                                  │
//! selected ids ──► ToolExecutor::execute ──────────┘
//!                      │  for each id, in order:
//!                      │    notify "Executing <Tool>..."
//!                      │    tool.execute(message, context)
//!                      │    error / panic ──► {"error": "..."}
//!                      ▼
//!                 ToolResults (ordered by selection)
//! ```
//!
//! # Built-in Tools
//!
//! - [`ConversationTool`] - Conversational reply through a [`brain_core::Brain`].
//!
//! Record queries, web search and expense bookkeeping are supplied by the
//! embedding application through the [`Tool`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use agent_tools::{ConversationTool, EnabledTools, ExecutionContext, ToolExecutor, ToolKind, ToolRegistry};
//!
//! let registry = ToolRegistry::builder(EnabledTools::default())
//!     .register(ToolKind::Conversation, ConversationTool::new(brain))
//!     .register(ToolKind::Expense, MyExpenseTool::new())
//!     .build()?;
//!
//! let executor = ToolExecutor::new(Arc::new(registry));
//! let results = executor
//!     .execute(&["expense".to_string()], "$12 lunch", &ExecutionContext::new())
//!     .await;
//! ```

mod context;
mod error;
mod executor;
mod kind;
mod progress;
mod registry;
mod tool;
pub mod tools;

pub use context::ExecutionContext;
pub use error::ToolError;
pub use executor::{panic_message, ToolExecutor, ToolResults};
pub use kind::ToolKind;
pub use progress::{LoggingProgress, NoOpProgress, ProgressSink};
pub use registry::{env_flag, EnabledTools, ToolRegistry, ToolRegistryBuilder};
pub use tool::{error_result, Tool};
pub use tools::ConversationTool;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
