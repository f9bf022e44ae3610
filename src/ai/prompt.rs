//! Prompt Assembly
//!
//! Composes the two-message [system, user] sequences for each supported
//! intent. Every template names the exact output sections the response
//! validator checks downstream (see `constants::sections`), so the two
//! sides cannot drift apart.
//!
//! Long freeform fields are truncated at fixed character ceilings before
//! interpolation; the token budgeter only governs whole-block inclusion,
//! never in-block trimming. Optional inputs are omitted from the template
//! rather than rendered as empty placeholders.

use crate::ai::client::ChatMessage;
use crate::constants::prompt::{
    DOCS_CHAR_LIMIT, MAX_EXAMPLES, RULES_CHAR_LIMIT, TEST_OUTPUT_CHAR_LIMIT,
};
use crate::types::{FeatureStatus, ProjectProfile};

/// Stateless prompt assembler.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptAssembler;

impl PromptAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Prompt for refining a user's Q&A answers into a feature specification.
    ///
    /// `answers` is an ordered list of (question, answer) pairs; ordering is
    /// preserved in the rendered prompt.
    pub fn refine_feature(
        &self,
        answers: &[(String, String)],
        profile: &ProjectProfile,
        existing_features: &[String],
    ) -> Vec<ChatMessage> {
        let system = "\
You are a senior software architect helping to create a clear feature specification.

Your role is to:
1. Take the user's answers about a feature they want to build
2. Structure them into a clear, actionable feature specification
3. Identify any gaps or ambiguities that need clarification
4. Ensure the specification is concrete and implementable

Do NOT add requirements the user didn't mention.
Do NOT suggest technology choices they didn't specify.
DO preserve their exact terminology and constraints.";

        let features = if existing_features.is_empty() {
            "None".to_string()
        } else {
            format_list(existing_features)
        };

        let user = format!(
            "\
Please convert these feature planning answers into a structured specification.

Project: {name}
Languages: {languages}
Frameworks: {frameworks}

User's Answers:
{answers}

Existing Features in Project:
{features}

Please create a feature specification with these sections:
1. **Feature Name**: A concise, descriptive name
2. **Description**: What this feature does (2-3 sentences)
3. **User Value**: Why this matters to users
4. **Scope**: What's included and what's explicitly excluded
5. **Key Requirements**: Bullet points of must-have functionality
6. **Technical Considerations**: Any technical constraints or notes
7. **Open Questions**: Any ambiguities that need clarification

Format as clean Markdown suitable for saving in INITIAL.md.",
            name = profile.name,
            languages = profile.languages_display(),
            frameworks = profile.frameworks_display(),
            answers = format_answers(answers),
            features = features,
        );

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }

    /// Prompt for generating a Product Requirements Prompt (PRP) from a
    /// feature specification and project context.
    pub fn requirements_prompt(
        &self,
        feature_spec: &str,
        profile: &ProjectProfile,
        coding_rules: &str,
        examples: &[String],
        docs_context: &str,
    ) -> Vec<ChatMessage> {
        let system = "\
You are a senior software architect creating a Product Requirements Prompt (PRP).

A PRP is a comprehensive document that enables an AI coding assistant to implement a feature correctly on the first attempt. It must be self-contained, precise, and actionable.

Your PRP must include ALL of these sections:
1. Context & Assumptions
2. Goals and Non-Goals
3. Ordered Implementation Steps
4. Implementation Checklist
5. Validation Plan

Be specific about file paths, function names, and technical details when the project structure makes them clear.";

        let mut context_parts = vec![format!(
            "\
## Project Context

**Name**: {name}
**Languages**: {languages}
**Frameworks**: {frameworks}
**Test Command**: {test_command}",
            name = profile.name,
            languages = profile.languages_display(),
            frameworks = profile.frameworks_display(),
            test_command = profile.test_command.as_deref().unwrap_or("Not specified"),
        )];

        if !coding_rules.is_empty() {
            context_parts.push(format!(
                "## Coding Rules\n\n{}",
                truncate_chars(coding_rules, RULES_CHAR_LIMIT)
            ));
        }

        context_parts.push(format!("## Feature Specification\n\n{}", feature_spec));

        if !examples.is_empty() {
            let examples_text = examples
                .iter()
                .take(MAX_EXAMPLES)
                .cloned()
                .collect::<Vec<_>>()
                .join("\n\n");
            context_parts.push(format!("## Code Examples\n\n{}", examples_text));
        }

        if !docs_context.is_empty() {
            context_parts.push(format!(
                "## Documentation Context\n\n{}",
                truncate_chars(docs_context, DOCS_CHAR_LIMIT)
            ));
        }

        let user = format!(
            "\
{context}

## Your Task

Create a comprehensive Product Requirements Prompt (PRP) for implementing this feature.

The PRP must have these exact sections:

### Context & Assumptions
- Current state of the codebase
- What already exists that we'll build on
- Key assumptions about the implementation

### Goals and Non-Goals
- **Goals**: What this implementation MUST achieve
- **Non-Goals**: What this implementation should NOT attempt

### Ordered Implementation Steps
1. First concrete step (e.g., \"Create new file `src/feature.py`\")
2. Second concrete step (e.g., \"Add function `process_data()` that...\")
3. Continue with specific, actionable steps...

### Implementation Checklist
A checklist an implementer can use to verify completeness:
- [ ] Component X is created and exported
- [ ] Function Y handles edge case Z
- [ ] Tests cover scenarios A, B, C
- [ ] Documentation updated in file D

### Validation Plan
How to verify the implementation works:
1. Run these specific commands...
2. Expected outcomes should be...
3. Manual testing steps include...

Remember:
- Be specific about file paths and function names
- Include error handling requirements
- Specify test coverage expectations
- Make each step concrete and actionable",
            context = context_parts.join("\n\n"),
        );

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }

    /// Prompt for analyzing whether an implementation matches its PRP.
    pub fn validation_analysis(
        &self,
        feature_name: &str,
        prp_content: &str,
        test_output: Option<&str>,
        implementation_notes: &str,
    ) -> Vec<ChatMessage> {
        let system = "\
You are a QA engineer analyzing whether an implementation matches its requirements.

Your role is to:
1. Compare the PRP requirements against actual implementation results
2. Identify what was successfully implemented
3. Note any deviations or missing pieces
4. Suggest improvements for future iterations

Be objective and specific in your analysis.";

        let test_section = match test_output {
            Some(output) if !output.is_empty() => format!(
                "## Test Results\n\n```\n{}\n```\n\n",
                truncate_chars(output, TEST_OUTPUT_CHAR_LIMIT)
            ),
            _ => String::new(),
        };

        let user = format!(
            "\
Please analyze the implementation of \"{feature_name}\".

## Original PRP

{prp_content}

{test_section}## Implementation Notes

{implementation_notes}

Please provide:

### Implementation Assessment
- What requirements were met?
- What requirements were missed or changed?
- Quality observations

### Patterns to Promote
- What worked well that should become standard practice?
- Any elegant solutions worth documenting?

### Issues Found
- Bugs or problems discovered
- Edge cases not handled
- Performance concerns

### Recommendations
- Specific improvements for this feature
- Updates needed for the project's coding rules
- Suggestions for future PRPs",
        );

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }

    /// Prompt for analyzing the health of a context-engineering workspace.
    pub fn health_check(
        &self,
        features: &[FeatureStatus],
        profile: &ProjectProfile,
        days_since_init: u32,
    ) -> Vec<ChatMessage> {
        let system = "\
You are a project manager analyzing the health of a context engineering workspace.

Your role is to:
1. Identify stale or incomplete artifacts
2. Suggest next actions for the team
3. Highlight any concerning patterns
4. Recommend cleanup or updates needed

Be constructive and action-oriented.";

        let status_lines = if features.is_empty() {
            "No features found".to_string()
        } else {
            features
                .iter()
                .map(|f| {
                    format!(
                        "- {}: PRP {}, Validation {}, Age: {} days",
                        f.name,
                        check_mark(f.has_prp),
                        check_mark(f.has_validation),
                        f.age_days
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let user = format!(
            "\
Please analyze the health of this workspace.

## Project Information
- **Name**: {name}
- **Days Since Setup**: {days_since_init}
- **Active Features**: {feature_count}

## Feature Status
{status_lines}

## Analysis Requested

### Overall Health Score
Give a score (1-10) with explanation.

### Stale Artifacts
Which features or files appear abandoned?

### Missing Documentation
What context is incomplete?

### Recommended Actions
1. Immediate priorities
2. Cleanup tasks
3. Documentation updates

### Process Improvements
Suggestions for better context engineering workflow.",
            name = profile.name,
            feature_count = features.len(),
        );

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }
}

/// Truncate to at most `limit` characters, respecting char boundaries.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn format_answers(answers: &[(String, String)]) -> String {
    let mut lines = Vec::with_capacity(answers.len() * 3);
    for (question, answer) in answers {
        lines.push(format!("**{}**", question));
        lines.push(answer.clone());
        lines.push(String::new());
    }
    lines.join("\n")
}

fn format_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn check_mark(flag: bool) -> &'static str {
    if flag { "\u{2713}" } else { "\u{2717}" }
}
