//! Assessment configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{ConfigError, ValidationError};
use crate::application::StoreRetryPolicy;
use crate::domain::assessment::{
    RetakePolicy, ScoringModel, ScoringTable, DEFAULT_RETAKE_COOLDOWN_DAYS,
};

const MAX_RETRY_ATTEMPTS: u32 = 10;
const MAX_RETRY_BASE_DELAY_MS: u64 = 10_000;

/// Scoring and retake settings
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    /// Days between two assessments
    #[serde(default = "default_cooldown_days")]
    pub retake_cooldown_days: u32,

    /// YAML scoring table replacing the built-in one
    pub scoring_table_path: Option<PathBuf>,

    /// Attempts per store operation, including the first
    #[serde(default = "default_retry_attempts")]
    pub store_retry_attempts: u32,

    /// Delay before the first retry; doubles on each further attempt
    #[serde(default = "default_retry_base_delay_ms")]
    pub store_retry_base_delay_ms: u64,
}

impl AssessmentConfig {
    pub fn retake_policy(&self) -> Result<RetakePolicy, ValidationError> {
        RetakePolicy::new(self.retake_cooldown_days)
            .map_err(|_| ValidationError::InvalidRetakeCooldown)
    }

    pub fn retry_policy(&self) -> StoreRetryPolicy {
        StoreRetryPolicy::new(
            self.store_retry_attempts,
            Duration::from_millis(self.store_retry_base_delay_ms),
        )
    }

    /// Builds the scoring model, reading the table file when one is configured.
    pub fn scoring_model(&self) -> Result<ScoringModel, ConfigError> {
        match &self.scoring_table_path {
            Some(path) => Ok(ScoringModel::new(ScoringTable::from_path(path)?)),
            None => Ok(ScoringModel::default()),
        }
    }

    /// Validate assessment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.retake_policy()?;
        if self.store_retry_attempts == 0 || self.store_retry_attempts > MAX_RETRY_ATTEMPTS {
            return Err(ValidationError::InvalidRetryAttempts);
        }
        if self.store_retry_base_delay_ms > MAX_RETRY_BASE_DELAY_MS {
            return Err(ValidationError::InvalidRetryDelay);
        }
        Ok(())
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            retake_cooldown_days: default_cooldown_days(),
            scoring_table_path: None,
            store_retry_attempts: default_retry_attempts(),
            store_retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

fn default_cooldown_days() -> u32 {
    DEFAULT_RETAKE_COOLDOWN_DAYS
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    50
}
