//! Token Estimation
//!
//! Heuristic token counting for LLM context management.
//!
//! ## Strategy
//! - Pre-calculate token counts before sending to the LLM
//! - Prevent context overflow by budgeting tokens per call
//!
//! The estimate is an approximation, not an exact tokenizer. Callers must
//! treat it as a heuristic bound, not a guarantee.

/// Estimate the token count of a text block.
///
/// Averages a character-based estimate (`chars / 4`) with a word-based
/// estimate (`words * 1.3`) and truncates. Deterministic, no side effects,
/// never fails. `estimate_tokens("")` is 0.
pub fn estimate_tokens(text: &str) -> usize {
    let chars = text.chars().count();
    let words = text.split_whitespace().count();

    let char_estimate = chars as f64 / 4.0;
    let word_estimate = words as f64 * 1.3;

    ((char_estimate + word_estimate) / 2.0) as usize
}

/// Check whether text fits within a token budget.
pub fn fits_budget(text: &str, budget: usize) -> bool {
    estimate_tokens(text) <= budget
}

/// Remaining budget after accounting for text.
pub fn remaining_budget(text: &str, budget: usize) -> usize {
    budget.saturating_sub(estimate_tokens(text))
}
