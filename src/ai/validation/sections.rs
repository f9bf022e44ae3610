//! Markdown Section Extraction
//!
//! Parses free-form model output into named sections and reports
//! completeness against an expected title list.

use std::collections::HashMap;

use tracing::warn;

use crate::constants::sections::PRP;

/// Result of checking a response against a required section list.
///
/// Absence of structure is a reportable result, not an error; nothing in
/// this module fails.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureReport {
    /// True iff `missing` and `empty` are both empty
    pub valid: bool,
    /// Required titles absent from the response entirely
    pub missing: Vec<String>,
    /// Required titles whose heading is present but whose body is blank
    pub empty: Vec<String>,
    /// Extracted section bodies, keyed by logical title
    pub sections: HashMap<String, String>,
}

/// Extract expected sections from a markdown response.
///
/// Scans line by line; a line starting with `#` is a heading. A heading
/// whose text contains an expected title (case-insensitive) opens that
/// section; opening another matched heading closes the previous one. The
/// returned map is keyed by the logical title regardless of the order the
/// sections appear in.
///
/// Headings that match no expected title neither close the open section
/// nor contribute to its body: the sub-heading line itself is stripped,
/// while the non-heading lines beneath it keep accumulating into the open
/// section. Callers that need verbatim bodies must not rely on nested
/// headings surviving extraction.
pub fn extract_sections(response: &str, expected_titles: &[&str]) -> HashMap<String, String> {
    let mut sections: HashMap<String, String> = HashMap::new();
    let mut current_title: Option<&str> = None;
    let mut current_body: Vec<&str> = Vec::new();

    for line in response.lines() {
        if line.starts_with('#') {
            let heading = line.trim_start_matches('#').trim();
            let heading_lower = heading.to_lowercase();

            for &title in expected_titles {
                if heading_lower.contains(title.to_lowercase().as_str()) {
                    if let Some(open) = current_title {
                        sections.insert(open.to_string(), current_body.join("\n").trim().to_string());
                    }
                    current_title = Some(title);
                    current_body = Vec::new();
                    break;
                }
            }
        } else if current_title.is_some() {
            current_body.push(line);
        }
    }

    if let Some(open) = current_title {
        sections.insert(open.to_string(), current_body.join("\n").trim().to_string());
    }

    let missing: Vec<&str> = expected_titles
        .iter()
        .copied()
        .filter(|title| !sections.contains_key(*title))
        .collect();
    if !missing.is_empty() {
        warn!(?missing, found = ?sections.keys().collect::<Vec<_>>(),
            "Missing expected sections in response");
    }

    sections
}

/// Check a response for required sections and blank bodies.
///
/// Idempotent: the same text always yields the same report.
pub fn validate_structure(response: &str, required_titles: &[&str]) -> StructureReport {
    let sections = extract_sections(response, required_titles);

    let mut missing = Vec::new();
    let mut empty = Vec::new();

    for title in required_titles {
        match sections.get(*title) {
            None => missing.push(title.to_string()),
            Some(body) if body.trim().is_empty() => empty.push(title.to_string()),
            Some(_) => {}
        }
    }

    let valid = missing.is_empty() && empty.is_empty();

    StructureReport {
        valid,
        missing,
        empty,
        sections,
    }
}

/// Validate a generated requirements prompt against the canonical PRP
/// section list.
pub fn validate_prp(prp_content: &str) -> StructureReport {
    validate_structure(prp_content, PRP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DOC: &str = "\
# Plan

### Goals and Non-Goals
Build the exporter.

### Validation Plan
Run the suite.
";

    #[test]
    fn test_extract_both_sections() {
        let sections = extract_sections(DOC, &["Goals and Non-Goals", "Validation Plan"]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections["Goals and Non-Goals"], "Build the exporter.");
        assert_eq!(sections["Validation Plan"], "Run the suite.");
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let doc = "## 2. GOALS AND NON-GOALS (draft)\nbody\n";
        let sections = extract_sections(doc, &["Goals and Non-Goals"]);
        assert_eq!(sections["Goals and Non-Goals"], "body");
    }

    #[test]
    fn test_order_independent_titles() {
        let doc = "## Validation Plan\nlater\n## Goals and Non-Goals\nearlier\n";
        let sections = extract_sections(doc, &["Goals and Non-Goals", "Validation Plan"]);
        assert_eq!(sections["Validation Plan"], "later");
        assert_eq!(sections["Goals and Non-Goals"], "earlier");
    }

    #[test]
    fn test_unmatched_heading_content_is_stripped() {
        // A sub-heading that matches no expected title is dropped along
        // with the lines under it; it does not close the open section.
        let doc = "\
## Goals and Non-Goals
kept line
### Random Aside
dropped? no: body lines under an unmatched heading still accumulate
";
        let sections = extract_sections(doc, &["Goals and Non-Goals"]);
        let body = &sections["Goals and Non-Goals"];
        assert!(body.contains("kept line"));
        // The unmatched heading line itself never appears in the body
        assert!(!body.contains("Random Aside"));
        // Non-heading lines after it still belong to the open section
        assert!(body.contains("still accumulate"));
    }

    #[test]
    fn test_missing_section_reported() {
        let doc = "## Goals and Non-Goals\nbody\n";
        let report = validate_structure(doc, &["Goals and Non-Goals", "Validation Plan"]);
        assert!(!report.valid);
        assert_eq!(report.missing, vec!["Validation Plan".to_string()]);
        assert!(report.empty.is_empty());
    }

    #[test]
    fn test_empty_section_reported() {
        let doc = "## Goals and Non-Goals\n\n## Validation Plan\nok\n";
        let report = validate_structure(doc, &["Goals and Non-Goals", "Validation Plan"]);
        assert!(!report.valid);
        assert!(report.missing.is_empty());
        assert_eq!(report.empty, vec!["Goals and Non-Goals".to_string()]);
    }

    #[test]
    fn test_complete_document_is_valid() {
        let report = validate_structure(DOC, &["Goals and Non-Goals", "Validation Plan"]);
        assert!(report.valid);
        assert!(report.missing.is_empty());
        assert!(report.empty.is_empty());
    }

    #[test]
    fn test_no_headings_at_all() {
        let report = validate_structure("just prose, no structure", &["Validation Plan"]);
        assert!(!report.valid);
        assert_eq!(report.missing, vec!["Validation Plan".to_string()]);
    }

    #[test]
    fn test_validate_prp_canonical_document() {
        let doc = "\
### Context & Assumptions
The codebase is a CLI.

### Goals and Non-Goals
Goals: ship it.

### Ordered Implementation Steps
1. Do the thing.

### Implementation Checklist
- [ ] thing done

### Validation Plan
Run tests.
";
        let report = validate_prp(doc);
        assert!(report.valid, "missing={:?} empty={:?}", report.missing, report.empty);
        assert_eq!(report.sections.len(), 5);
    }

    proptest! {
        #[test]
        fn prop_validate_structure_idempotent(text in ".{0,400}") {
            let titles = ["Goals and Non-Goals", "Validation Plan"];
            let first = validate_structure(&text, &titles);
            let second = validate_structure(&text, &titles);
            prop_assert_eq!(first, second);
        }
    }
}
