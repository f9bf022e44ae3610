//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Retry and backoff constants
pub mod retry {
    /// Default maximum retries per completion call
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const INITIAL_DELAY_MS: u64 = 1_000;

    /// Maximum delay between retries (seconds)
    pub const MAX_DELAY_SECS: u64 = 30;

    /// Backoff multiplier
    pub const BACKOFF_FACTOR: f64 = 2.0;

    /// Default per-attempt timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
}

/// Context budget constants
pub mod context {
    /// Conservative context ceiling for most local models (estimated tokens)
    pub const MAX_CONTEXT_TOKENS: usize = 8_000;
}

/// Prompt assembly constants
pub mod prompt {
    /// Character ceiling for interpolated coding-rules text
    pub const RULES_CHAR_LIMIT: usize = 2_000;

    /// Character ceiling for interpolated documentation excerpts
    pub const DOCS_CHAR_LIMIT: usize = 1_000;

    /// Character ceiling for interpolated test output
    pub const TEST_OUTPUT_CHAR_LIMIT: usize = 2_000;

    /// Maximum number of code examples interpolated into a prompt
    pub const MAX_EXAMPLES: usize = 3;
}

/// Canonical section titles shared by the prompt assembler and the
/// response validator. Keeping them in one place prevents the two
/// sides from drifting apart.
pub mod sections {
    /// Sections a requirements prompt (PRP) must contain
    pub const PRP: &[&str] = &[
        "Context & Assumptions",
        "Goals and Non-Goals",
        "Ordered Implementation Steps",
        "Implementation Checklist",
        "Validation Plan",
    ];

    /// Sections of a refined feature specification
    pub const FEATURE_SPEC: &[&str] = &[
        "Feature Name",
        "Description",
        "User Value",
        "Scope",
        "Key Requirements",
        "Technical Considerations",
        "Open Questions",
    ];

    /// Sections of a validation analysis
    pub const VALIDATION: &[&str] = &[
        "Implementation Assessment",
        "Patterns to Promote",
        "Issues Found",
        "Recommendations",
    ];

    /// Sections of a workspace health report
    pub const HEALTH: &[&str] = &[
        "Overall Health Score",
        "Stale Artifacts",
        "Missing Documentation",
        "Recommended Actions",
        "Process Improvements",
    ];
}
