//! Profile configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Longitudinal profile configuration
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ProfileConfig {
    /// EMA baseline window; alpha = 2 / (window + 1)
    #[serde(default = "default_baseline_window")]
    pub baseline_window: usize,

    /// Maximum retained history entries per user
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Per-interaction personality drift step
    #[serde(default = "default_personality_drift_step")]
    pub personality_drift_step: f64,
}

impl ProfileConfig {
    /// EMA smoothing factor derived from the window
    pub fn baseline_alpha(&self) -> f64 {
        2.0 / (self.baseline_window as f64 + 1.0)
    }

    /// Validate profile configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.baseline_window == 0 {
            return Err(ValidationError::ZeroWindow("profile.baseline_window"));
        }
        if self.history_cap == 0 {
            return Err(ValidationError::ZeroWindow("profile.history_cap"));
        }
        if !(0.0..=1.0).contains(&self.personality_drift_step) {
            return Err(ValidationError::OutOfUnitRange("profile.personality_drift_step"));
        }
        Ok(())
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            baseline_window: default_baseline_window(),
            history_cap: default_history_cap(),
            personality_drift_step: default_personality_drift_step(),
        }
    }
}

fn default_baseline_window() -> usize {
    30
}

fn default_history_cap() -> usize {
    100
}

fn default_personality_drift_step() -> f64 {
    0.01
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(ProfileConfig::default().validate().is_ok());
    }

    #[test]
    fn alpha_follows_window() {
        let config = ProfileConfig::default();
        let alpha = config.baseline_alpha();
        assert!((alpha - 2.0 / 31.0).abs() < 1e-12);
    }

    #[test]
    fn zero_history_cap_rejected() {
        let config = ProfileConfig {
            history_cap: 0,
            ..ProfileConfig::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::ZeroWindow(_))));
    }
}
