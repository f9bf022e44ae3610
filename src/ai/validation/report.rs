//! Typed Views Over Extracted Sections
//!
//! Reshapes raw model markdown into the documents callers persist:
//! feature specifications, validation insights, and health reports.

use std::sync::LazyLock;

use regex::Regex;

use super::sections::extract_sections;
use crate::constants::sections::{FEATURE_SPEC, HEALTH, VALIDATION};

/// Rebuild a canonical feature specification from a raw model response.
///
/// The feature name becomes the document header; the remaining non-empty
/// sections follow in canonical order. Sections the model skipped are
/// simply absent.
pub fn format_feature_spec(raw_response: &str) -> String {
    let sections = extract_sections(raw_response, FEATURE_SPEC);

    let mut lines = Vec::new();

    let feature_name = sections
        .get("Feature Name")
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or("New Feature");
    lines.push(format!("## {}", feature_name));
    lines.push(String::new());

    for title in FEATURE_SPEC.iter().skip(1) {
        if let Some(body) = sections.get(*title)
            && !body.is_empty()
        {
            lines.push(format!("### {}", title));
            lines.push(String::new());
            lines.push(body.clone());
            lines.push(String::new());
        }
    }

    lines.push("---".to_string());
    lines.push("*Generated by promptcraft*".to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// Insights pulled from a validation analysis response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationInsights {
    pub assessment: String,
    pub patterns_to_promote: String,
    pub issues_found: String,
    pub recommendations: String,
}

/// Extract the named insight sections from a validation analysis.
pub fn extract_validation_insights(response: &str) -> ValidationInsights {
    let mut sections = extract_sections(response, VALIDATION);
    let mut take = |title: &str| sections.remove(title).unwrap_or_default();

    ValidationInsights {
        assessment: take("Implementation Assessment"),
        patterns_to_promote: take("Patterns to Promote"),
        issues_found: take("Issues Found"),
        recommendations: take("Recommendations"),
    }
}

/// Structured health report extracted from a health-check response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthReport {
    /// Score scraped from the score section, when the model gave one (1-10)
    pub score: Option<u8>,
    pub score_explanation: String,
    pub stale_artifacts: String,
    pub missing_docs: String,
    pub recommended_actions: String,
    pub process_improvements: String,
}

static SCORE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b([1-9]|10)\b").ok());

/// Extract a structured health report from a health-check response.
pub fn extract_health_report(response: &str) -> HealthReport {
    let mut sections = extract_sections(response, HEALTH);
    let mut take = |title: &str| sections.remove(title).unwrap_or_default();

    let score_explanation = take("Overall Health Score");
    let score = SCORE_PATTERN
        .as_ref()
        .and_then(|re| re.captures(&score_explanation))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    HealthReport {
        score,
        score_explanation,
        stale_artifacts: take("Stale Artifacts"),
        missing_docs: take("Missing Documentation"),
        recommended_actions: take("Recommended Actions"),
        process_improvements: take("Process Improvements"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_feature_spec_full_document() {
        let raw = "\
### Feature Name
Fast Exports

### Description
Streams CSV exports.

### Key Requirements
- stream rows
";
        let spec = format_feature_spec(raw);
        assert!(spec.starts_with("## Fast Exports"));
        assert!(spec.contains("### Description\n\nStreams CSV exports."));
        assert!(spec.contains("### Key Requirements"));
        // Sections the model skipped are absent, not rendered empty
        assert!(!spec.contains("### User Value"));
        assert!(spec.ends_with("*Generated by promptcraft*\n"));
    }

    #[test]
    fn test_format_feature_spec_fallback_name() {
        let spec = format_feature_spec("no sections here");
        assert!(spec.starts_with("## New Feature"));
    }

    #[test]
    fn test_extract_validation_insights() {
        let raw = "\
### Implementation Assessment
All goals met.

### Issues Found
None.
";
        let insights = extract_validation_insights(raw);
        assert_eq!(insights.assessment, "All goals met.");
        assert_eq!(insights.issues_found, "None.");
        assert!(insights.patterns_to_promote.is_empty());
        assert!(insights.recommendations.is_empty());
    }

    #[test]
    fn test_extract_health_report_with_score() {
        let raw = "\
### Overall Health Score
I'd rate this workspace 7 out of 10.

### Stale Artifacts
The exports feature looks abandoned.

### Recommended Actions
1. Validate exports.
";
        let report = extract_health_report(raw);
        assert_eq!(report.score, Some(7));
        assert!(report.score_explanation.contains("7 out of 10"));
        assert!(report.stale_artifacts.contains("abandoned"));
        assert!(report.missing_docs.is_empty());
    }

    #[test]
    fn test_extract_health_report_without_score() {
        let raw = "### Overall Health Score\nHealthy overall, no number given.\n";
        let report = extract_health_report(raw);
        assert_eq!(report.score, None);
    }
}
