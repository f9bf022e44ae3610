//! Response Validation
//!
//! Validates the structure of free-form model output:
//! - Named markdown section extraction
//! - Required-section completeness reports
//! - Typed views (feature specs, validation insights, health reports)

mod report;
mod sections;

pub use report::{
    HealthReport, ValidationInsights, extract_health_report, extract_validation_insights,
    format_feature_spec,
};
pub use sections::{StructureReport, extract_sections, validate_prp, validate_structure};
