//! Unified Error Type System
//!
//! Centralized error types for the crate.
//!
//! ## Design Principles
//!
//! - Single unified error type (CraftError) for programmer errors
//! - Expected completion failures are values (`CompletionResult`), never `Err`
//! - No panic/unwrap in library code

use thiserror::Error;

/// Crate-wide error type for programmer and environment errors.
///
/// Expected LLM failure modes (timeouts, bad responses, exhausted retries)
/// never appear here; the gateway reports them through `CompletionResult`.
#[derive(Debug, Error)]
pub enum CraftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl CraftError {
    /// Create a config error from a message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CraftError>;
