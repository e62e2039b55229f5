//! Routing configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Routing rule thresholds
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Per-emotion intensity counting toward the multi-indicator rule
    #[serde(default = "default_multi_indicator_threshold")]
    pub multi_indicator_threshold: f64,

    /// Distinct emotions at/above the threshold needed to fire the rule
    #[serde(default = "default_multi_indicator_count")]
    pub multi_indicator_count: usize,

    /// Arousal above this counts as high arousal
    #[serde(default = "default_high_arousal")]
    pub high_arousal: f64,

    /// Dominant intensity the high-arousal rule additionally requires
    #[serde(default = "default_dominant_floor")]
    pub dominant_floor: f64,
}

impl RoutingConfig {
    /// Validate routing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("routing.multi_indicator_threshold", self.multi_indicator_threshold),
            ("routing.high_arousal", self.high_arousal),
            ("routing.dominant_floor", self.dominant_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::OutOfUnitRange(name));
            }
        }
        if self.multi_indicator_count == 0 {
            return Err(ValidationError::ZeroWindow("routing.multi_indicator_count"));
        }
        Ok(())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            multi_indicator_threshold: default_multi_indicator_threshold(),
            multi_indicator_count: default_multi_indicator_count(),
            high_arousal: default_high_arousal(),
            dominant_floor: default_dominant_floor(),
        }
    }
}

fn default_multi_indicator_threshold() -> f64 {
    0.5
}

fn default_multi_indicator_count() -> usize {
    2
}

fn default_high_arousal() -> f64 {
    0.7
}

fn default_dominant_floor() -> f64 {
    0.3
}
