//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Weight set sums to zero: {0}")]
    ZeroWeightSum(&'static str),

    #[error("Value out of [0, 1] range: {0}")]
    OutOfUnitRange(&'static str),

    #[error("Risk bands out of order (medium must be below high)")]
    BandsOutOfOrder,

    #[error("Keyword table is empty: {0}")]
    EmptyKeywordTable(&'static str),

    #[error("Window or cap must be nonzero: {0}")]
    ZeroWindow(&'static str),
}
