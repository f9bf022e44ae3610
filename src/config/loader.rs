//! Configuration Loader
//!
//! Loads configuration from a YAML file with environment overrides:
//! 1. Built-in defaults
//! 2. YAML config file (when present)
//! 3. Environment variables (PROMPTCRAFT_* prefix)

use std::env;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::Config;
use crate::types::{CraftError, Result};

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "PROMPTCRAFT_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file, apply environment overrides,
    /// and validate.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(CraftError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Err(CraftError::config("Configuration file is empty"));
        }

        debug!(path = %path.display(), "Loading config");
        let mut config: Config = serde_yaml::from_str(&raw)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Built-in defaults with environment overrides applied.
    pub fn load_defaults() -> Result<Config> {
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply PROMPTCRAFT_* environment overrides onto a config.
    fn apply_env_overrides(config: &mut Config) -> Result<()> {
        if let Some(endpoint) = Self::env_var("ENDPOINT") {
            config.llm.endpoint = endpoint;
        }
        if let Some(model) = Self::env_var("MODEL") {
            config.llm.model = model;
        }
        if let Some(timeout) = Self::env_var("TIMEOUT_SECS") {
            config.llm.timeout_secs = timeout.parse().map_err(|_| {
                CraftError::config(format!("{}TIMEOUT_SECS must be an integer", ENV_PREFIX))
            })?;
        }
        if let Some(retries) = Self::env_var("MAX_RETRIES") {
            config.llm.max_retries = retries.parse().map_err(|_| {
                CraftError::config(format!("{}MAX_RETRIES must be an integer", ENV_PREFIX))
            })?;
        }
        if let Some(key) = Self::env_var("API_KEY") {
            config.llm.api_key = Some(key);
        }
        Ok(())
    }

    fn env_var(suffix: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, suffix))
            .ok()
            .filter(|value| !value.is_empty())
    }
}
