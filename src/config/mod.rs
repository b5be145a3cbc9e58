//! Runtime configuration
//!
//! Everything here comes from environment variables prefixed with
//! [`ENV_PREFIX`](crate::project_identity::ENV_PREFIX). Unset or empty
//! variables fall back to the defaults below.

use crate::project_identity;
use std::collections::HashMap;

pub const DEFAULT_PYTHON: &str = "python3";

/// Package archives a freshly created Cask file pulls from.
pub const DEFAULT_CASK_SOURCES: &[&str] = &["gnu", "melpa", "org"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend used when `--lang` is not given. `None` means autodetect.
    pub language: Option<String>,
    /// Interpreter used for PyPI queries and standard-library lookups.
    pub python: String,
    pub cask_sources: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            python: DEFAULT_PYTHON.to_string(),
            cask_sources: DEFAULT_CASK_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        let get = |suffix: &str| {
            vars.get(&project_identity::env_key(suffix))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        config.language = get("LANGUAGE");

        if let Some(python) = get("PYTHON") {
            config.python = python;
        }

        if let Some(sources) = get("CASK_SOURCES") {
            config.cask_sources = sources
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        config
    }
}
