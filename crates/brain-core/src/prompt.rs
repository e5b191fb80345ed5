//! Prompt helpers for hashing and loading prompt files.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Load a prompt from a file path.
///
/// Returns `Some(content)` if the file exists, is readable and is not blank.
pub fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();

    match std::fs::read_to_string(path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(e) => {
            debug!("Prompt file {} not loaded: {}", path.display(), e);
            None
        }
    }
}
