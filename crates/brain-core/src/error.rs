//! Error types for provider operations.

use thiserror::Error;

/// Errors that can occur while asking a provider for a completion.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The provider is temporarily unavailable.
    #[error("brain unavailable: {0}")]
    Unavailable(String),

    /// The request could not be processed.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The provider is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A timeout occurred inside the provider client.
    #[error("processing timed out")]
    Timeout,
}
