//! Fallback configuration.
//!
//! All fields have defaults, so an empty `[fallback]` table (or none at all)
//! yields the standard Gemma fallback order with three passes and 1 s / 2 s
//! exponential backoff.

use crate::BackoffSchedule;
use polyglot_error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default fallback order, highest quality first.
pub const DEFAULT_MODELS: [&str; 4] = [
    "gemma-3-27b-it",
    "gemma-3-12b-it",
    "gemma-3-4b-it",
    "gemma-3-1b-it",
];

/// Model order, pass count and backoff for a [`FallbackOrchestrator`](crate::FallbackOrchestrator).
///
/// # Example
///
/// ```toml
/// [fallback]
/// models = ["gemma-3-27b-it", "gemma-3-12b-it"]
/// max_passes = 1     # single pass, no backoff
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FallbackConfig {
    /// Model identifiers, best first
    #[serde(default = "default_models")]
    models: Vec<String>,

    /// Number of full traversals of `models` before giving up
    #[serde(default = "default_max_passes")]
    max_passes: usize,

    /// Delay schedule between passes
    #[serde(default)]
    backoff: BackoffSchedule,
}

fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|model| model.to_string()).collect()
}

fn default_max_passes() -> usize {
    3
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            max_passes: default_max_passes(),
            backoff: BackoffSchedule::default(),
        }
    }
}

impl FallbackConfig {
    /// Create a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns an error if `models` is empty, contains a blank identifier, or
    /// `max_passes` is zero.
    pub fn new(
        models: impl IntoIterator<Item = impl Into<String>>,
        max_passes: usize,
        backoff: BackoffSchedule,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            models: models.into_iter().map(Into::into).collect(),
            max_passes,
            backoff,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the orchestrator relies on.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    #[instrument(skip(self), fields(models = self.models.len(), max_passes = self.max_passes))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.models.is_empty() {
            return Err(ConfigError::invalid(
                "fallback.models",
                "at least one model is required",
            ));
        }
        if let Some(position) = self.models.iter().position(|m| m.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "fallback.models",
                format!("entry {} is blank", position),
            ));
        }
        if self.max_passes == 0 {
            return Err(ConfigError::invalid(
                "fallback.max_passes",
                "must be at least 1",
            ));
        }
        debug!("Fallback configuration is valid");
        Ok(())
    }

    /// Upper bound on `generate` calls for one run.
    pub fn max_attempts(&self) -> usize {
        self.max_passes.saturating_mul(self.models.len())
    }
}
