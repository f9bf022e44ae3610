//! Shared Types
//!
//! Error types and project metadata shared across modules.

pub mod error;
pub mod profile;

pub use error::{CraftError, Result};
pub use profile::{FeatureStatus, ProjectProfile};
