//! Configuration error types

use thiserror::Error;

use crate::domain::assessment::ScoringTableError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Scoring table could not be loaded: {0}")]
    ScoringTable(#[from] ScoringTableError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid server host: {0}")]
    InvalidHost(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Retake cooldown must be between 1 and 365 days")]
    InvalidRetakeCooldown,

    #[error("Store retry attempts must be between 1 and 10")]
    InvalidRetryAttempts,

    #[error("Store retry base delay must be at most 10000ms")]
    InvalidRetryDelay,
}
