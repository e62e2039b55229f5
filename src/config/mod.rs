//! Engine configuration module
//!
//! Type-safe configuration loading using the `config` and `dotenvy` crates.
//! Every threshold, weight, and keyword table the engine uses lives here as
//! data with documented defaults. Values are loaded with the `MINDGATE`
//! prefix and nested fields use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use mindgate::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod fusion;
mod profile;
mod risk;
mod routing;

pub use error::{ConfigError, ValidationError};
pub use fusion::{AudioHeuristics, FusionConfig, FusionMode, ImageHeuristics, KeywordRule};
pub use profile::ProfileConfig;
pub use risk::RiskConfig;
pub use routing::RoutingConfig;

use serde::Deserialize;

/// Root engine configuration
///
/// Every section has complete built-in defaults, so `EngineConfig::default()`
/// is a fully working configuration. [`EngineConfig::load()`] layers
/// environment overrides on top.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct EngineConfig {
    /// Normalization and modality fusion (weights, keyword table, heuristics)
    #[serde(default)]
    pub fusion: FusionConfig,

    /// Risk assessment (urgency weights, hard thresholds, bands, slope)
    #[serde(default)]
    pub risk: RiskConfig,

    /// Routing rule thresholds
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Longitudinal profile (baseline window, history cap, drift)
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables over built-in defaults
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `MINDGATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `MINDGATE__RISK__HIGH_BAND=0.75` -> `risk.high_band = 0.75`
    /// - `MINDGATE__PROFILE__HISTORY_CAP=200` -> `profile.history_cap = 200`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if override values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MINDGATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any weight set sums to zero, bands are
    /// out of order, a keyword table is empty, or a window/cap is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.fusion.validate()?;
        self.risk.validate()?;
        self.routing.validate()?;
        self.profile.validate()?;
        Ok(())
    }
}
