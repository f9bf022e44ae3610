//! Configuration Types
//!
//! Configuration structures with sensible defaults for a local
//! OpenAI-compatible endpoint.

use serde::{Deserialize, Serialize};

use crate::constants::{context, retry};
use crate::types::{CraftError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Chat endpoint settings
    pub llm: LlmConfig,

    /// Context budgeting settings
    pub context: ContextConfig,
}

impl Config {
    /// Validate configuration after loading.
    pub fn validate(&self) -> Result<()> {
        if self.llm.endpoint.is_empty() {
            return Err(CraftError::config("llm.endpoint must not be empty"));
        }
        if self.llm.model.is_empty() {
            return Err(CraftError::config("llm.model must not be empty"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(CraftError::config("llm.timeout_secs must be positive"));
        }
        if !(0.0..=1.0).contains(&self.llm.temperature) {
            return Err(CraftError::config(
                "llm.temperature must be within [0.0, 1.0]",
            ));
        }
        Ok(())
    }
}

/// Chat completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Full URL of the chat completion endpoint
    pub endpoint: String,

    /// Model name requested from the endpoint
    pub model: String,

    /// Per-attempt request timeout in seconds. Timeouts compound across
    /// retries: a call with N retries can take roughly (N+1) * timeout
    /// plus backoff sleeps in the worst case.
    pub timeout_secs: u64,

    /// Maximum retries for retryable failures
    pub max_retries: u32,

    /// Default sampling temperature (0.0 = deterministic)
    pub temperature: f32,

    /// Optional bearer token for authenticated endpoints.
    /// Never serialized back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: retry::DEFAULT_TIMEOUT_SECS,
            max_retries: retry::DEFAULT_MAX_RETRIES,
            temperature: 0.7,
            api_key: None,
        }
    }
}

/// Context budgeting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Token ceiling for assembled context
    pub max_context_tokens: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_context_tokens: context::MAX_CONTEXT_TOKENS,
        }
    }
}
