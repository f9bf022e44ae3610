//! Project Metadata Types
//!
//! Structured inputs owned by filesystem/CLI collaborators and consumed
//! by the prompt assembler.

use serde::{Deserialize, Serialize};

/// Metadata describing the project a prompt is assembled for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectProfile {
    /// Project name
    pub name: String,
    /// Detected or declared languages
    #[serde(default)]
    pub languages: Vec<String>,
    /// Detected or declared frameworks
    #[serde(default)]
    pub frameworks: Vec<String>,
    /// Command used to run the project's tests
    #[serde(default)]
    pub test_command: Option<String>,
}

impl ProjectProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Languages formatted for prompt interpolation
    pub fn languages_display(&self) -> String {
        if self.languages.is_empty() {
            "Not specified".to_string()
        } else {
            self.languages.join(", ")
        }
    }

    /// Frameworks formatted for prompt interpolation
    pub fn frameworks_display(&self) -> String {
        if self.frameworks.is_empty() {
            "Not specified".to_string()
        } else {
            self.frameworks.join(", ")
        }
    }
}

/// Per-feature workspace state consumed by the health-check prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureStatus {
    /// Feature name
    pub name: String,
    /// Whether a requirements prompt exists for this feature
    pub has_prp: bool,
    /// Whether a validation record exists for this feature
    pub has_validation: bool,
    /// Days since the feature's artifacts were last touched
    pub age_days: u32,
}
