//! Configuration
//!
//! Serde-backed configuration types and the YAML loader.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Config, ContextConfig, LlmConfig};
