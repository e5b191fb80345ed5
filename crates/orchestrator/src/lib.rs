//! Intent classification and tool orchestration.
//!
//! This crate provides the [`Orchestrator`] type which takes one free-text
//! message, decides which tools should handle it, runs them, and returns a
//! single [`ResponseEnvelope`]. [`Orchestrator::handle`] never fails: every
//! error is recovered somewhere in the pipeline.
//!
//! # Features
//!
//! - Keyword fast path for obvious messages (currency amounts, "search ...")
//! - Language-model classification with JSON extraction from chatty replies
//! - Confidence gate that falls back to the conversation tool
//! - Sequential tool execution with per-tool failure isolation
//! - Result combination with an ordered summary
//! - Fallback chain: conversation tool alone, then a generic apology
//!
//! # Architecture
//!
//! ```text
//! message + ExecutionContext
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  Routing    IntentRouter                                    │
//! │               • keyword only      (use_model_intent = false)│
//! │               • obvious → keyword (hybrid_mode = true)      │
//! │               • model, keyword on ClassificationError       │
//! │               • ConfidenceValidator on every exit           │
//! │         ↓                                                   │
//! │  Executing  ToolExecutor (in order, failures isolated)      │
//! │         ↓                                                   │
//! │  Combining  combine() → pass-through or summary             │
//! │         ↓                                                   │
//! │  Done       ResponseEnvelope                                │
//! │                                                             │
//! │  Any stage error/panic → Recovering:                        │
//! │     conversation tool alone → fallback envelope             │
//! │     conversation fails      → apology envelope              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orchestrator::{ExecutionContext, Orchestrator, OrchestratorConfig, ToolKind};
//!
//! let orchestrator = Orchestrator::from_tools(
//!     &OrchestratorConfig::default(),
//!     brain.clone(),
//!     [(ToolKind::Expense, Arc::new(MyExpenseTool) as Arc<dyn Tool>)],
//! )?;
//!
//! let context = ExecutionContext::new()
//!     .with_value("tenant_id", "acme")
//!     .with_progress(|status: &str| println!("{}", status));
//!
//! let envelope = orchestrator.handle("$25 for lunch", context).await;
//! println!("{}", envelope.to_json());
//! ```

mod combiner;
mod config;
mod envelope;
mod error;
mod model_classifier;
mod orchestrator;
mod patterns;
mod router;
mod selection;
mod validator;

// Public exports
pub use combiner::{combine, CombinedResult, SynthesizedResult};
pub use config::{OrchestratorConfig, DEFAULT_MIN_CONFIDENCE};
pub use envelope::{ResponseEnvelope, ResponseMetadata};
pub use error::OrchestratorError;
pub use model_classifier::{
    extract_json, load_intent_prompt, parse_selection, ModelClassifier, DEFAULT_INTENT_PROMPT_FILE,
    DEFAULT_INTENT_SYSTEM_PROMPT, SEARCH_BIAS_KEYWORDS,
};
pub use orchestrator::{validate_message, Orchestrator, APOLOGY_TEXT};
pub use patterns::PatternClassifier;
pub use router::{IntentRouter, RoutePath};
pub use selection::{ToolSelection, DEFAULT_MODEL_CONFIDENCE};
pub use validator::ConfidenceValidator;

// Re-export commonly used types from dependencies
pub use agent_tools::{
    EnabledTools, ExecutionContext, LoggingProgress, NoOpProgress, ProgressSink, Tool, ToolError,
    ToolKind, ToolRegistry, ToolResults,
};
pub use brain_core::{Brain, BrainError};

// Re-export async_trait for tool implementors
pub use async_trait::async_trait;
