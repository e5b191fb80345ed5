//! Core trait and types for language-model providers.
//!
//! The intent router consumes a language model as an opaque completion
//! capability. This crate defines that boundary:
//!
//! - [`Brain`] - The trait that every provider implements
//! - [`BrainError`] - Error types for provider operations
//! - [`hash_prompt`] / [`load_prompt_file`] - Prompt fingerprinting and loading
//!
//! # Example
//!
//! ```rust
//! use brain_core::{async_trait, Brain, BrainError};
//!
//! struct MyBrain;
//!
//! #[async_trait]
//! impl Brain for MyBrain {
//!     async fn complete(&self, _system: &str, user: &str) -> Result<String, BrainError> {
//!         Ok(format!("you said: {}", user))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyBrain"
//!     }
//! }
//! ```

mod error;
mod prompt;
mod trait_def;

pub use error::BrainError;
pub use prompt::{hash_prompt, load_prompt_file};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
