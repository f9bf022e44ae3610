//! LLM Call Pipeline
//!
//! The core of the crate: prompt assembly, token budgeting, the retrying
//! chat completion client, and response validation.

pub mod budget;
pub mod client;
pub mod prompt;
pub mod tokenizer;
pub mod validation;

pub use budget::{ContextBlock, ContextBudgeter, FittedContext, detect_secrets};
pub use client::{
    AttemptOutcome, CallError, CallErrorKind, CallObserver, ChatClient, ChatMessage,
    ChatTransport, CompletionRequest, CompletionResult, HttpTransport, ParsedReply, Role,
    TracingObserver,
};
pub use prompt::PromptAssembler;
pub use tokenizer::{estimate_tokens, fits_budget, remaining_budget};
pub use validation::{
    HealthReport, StructureReport, ValidationInsights, extract_health_report,
    extract_sections, extract_validation_insights, format_feature_spec, validate_prp,
    validate_structure,
};
