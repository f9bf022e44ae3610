//! promptcraft - Fault-Tolerant LLM Call Pipeline
//!
//! A client library for local OpenAI-compatible chat endpoints that
//! survives transient network failures, keeps prompts within a bounded
//! token budget, and validates that free-form markdown answers contain
//! the sections the caller expects.
//!
//! ## Core Components
//!
//! - **Token estimation**: heuristic token counts for context budgeting
//! - **Context budgeting**: required/optional block selection under a ceiling
//! - **Prompt assembly**: two-message prompts for each supported intent
//! - **Retrying client**: exponential backoff with a retryable/fatal taxonomy
//! - **Response validation**: named markdown section extraction and reports
//!
//! ## Quick Start
//!
//! ```ignore
//! use promptcraft::{ChatClient, ChatMessage, Config, validate_prp};
//!
//! let config = Config::default();
//! let client = ChatClient::new(&config.llm)?;
//! let result = client
//!     .complete(&[ChatMessage::user("Hello")], 0.7, Some(256))
//!     .await;
//! if result.success {
//!     let report = validate_prp(&result.content);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt assembly, budgeting, client, and validation
//! - [`config`]: configuration types and YAML loading
//! - [`types`]: crate error type and project metadata

pub mod ai;
pub mod config;
pub mod constants;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ContextConfig, LlmConfig};

// Error Types
pub use types::{CraftError, FeatureStatus, ProjectProfile, Result};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    // Client
    AttemptOutcome,
    CallError,
    CallErrorKind,
    CallObserver,
    ChatClient,
    ChatMessage,
    ChatTransport,
    CompletionRequest,
    CompletionResult,
    // Budget
    ContextBlock,
    ContextBudgeter,
    FittedContext,
    HttpTransport,
    // Prompt
    PromptAssembler,
    Role,
    // Validation
    StructureReport,
    TracingObserver,
    detect_secrets,
    // Tokenizer
    estimate_tokens,
    extract_sections,
    format_feature_spec,
    validate_prp,
    validate_structure,
};
