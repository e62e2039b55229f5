//! Risk assessment configuration

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::emotion::{Emotion, SignalName};

use super::error::ValidationError;

static DEFAULT_CRISIS_KEYWORDS: Lazy<Vec<String>> = Lazy::new(|| {
    // A broken embedded list would silently stop crisis escalation, so it
    // must fail loudly instead.
    serde_yaml::from_str(include_str!("defaults/crisis_keywords.yaml"))
        .expect("embedded crisis_keywords.yaml must parse")
});

/// Risk assessment configuration
///
/// The numeric defaults are engine configuration, not clinical calibration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RiskConfig {
    /// Per-emotion contribution weights for the urgency score.
    /// Emotions absent from the map contribute nothing.
    #[serde(default = "default_urgency_weights")]
    pub urgency_weights: BTreeMap<Emotion, f64>,

    /// Per-emotion intensities at or above which risk is CRITICAL outright
    #[serde(default = "default_hard_thresholds")]
    pub hard_thresholds: BTreeMap<Emotion, f64>,

    /// Per-signal values at or above which risk is CRITICAL outright
    #[serde(default = "default_signal_crisis_thresholds")]
    pub signal_crisis_thresholds: BTreeMap<SignalName, f64>,

    /// Signals above this value (but below crisis) add to urgency
    #[serde(default = "default_signal_urgency_threshold")]
    pub signal_urgency_threshold: f64,

    /// Urgency contribution per elevated signal
    #[serde(default = "default_signal_urgency_weight")]
    pub signal_urgency_weight: f64,

    /// History entries considered for the slope term
    #[serde(default = "default_slope_window")]
    pub slope_window: usize,

    /// Multiplier applied to the slope before it joins the urgency score
    #[serde(default = "default_slope_gain")]
    pub slope_gain: f64,

    /// Urgency at or above this is MEDIUM
    #[serde(default = "default_medium_band")]
    pub medium_band: f64,

    /// Urgency at or above this is HIGH
    #[serde(default = "default_high_band")]
    pub high_band: f64,

    /// Context substrings that force CRITICAL/CRISIS
    #[serde(default = "default_crisis_keywords")]
    pub crisis_keywords: Vec<String>,
}

impl RiskConfig {
    /// True when the text contains any crisis keyword (case-insensitive)
    pub fn matches_crisis_keyword(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.crisis_keywords
            .iter()
            .find(|k| lowered.contains(&k.to_lowercase()))
            .map(|k| k.as_str())
    }

    /// Validate risk configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.urgency_weights.is_empty() {
            return Err(ValidationError::ZeroWeightSum("risk.urgency_weights"));
        }
        if !(0.0..=1.0).contains(&self.medium_band) || !(0.0..=1.0).contains(&self.high_band) {
            return Err(ValidationError::OutOfUnitRange("risk.bands"));
        }
        if self.medium_band >= self.high_band {
            return Err(ValidationError::BandsOutOfOrder);
        }
        if self.slope_window == 0 {
            return Err(ValidationError::ZeroWindow("risk.slope_window"));
        }
        if self.crisis_keywords.is_empty() {
            return Err(ValidationError::EmptyKeywordTable("risk.crisis_keywords"));
        }
        Ok(())
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            urgency_weights: default_urgency_weights(),
            hard_thresholds: default_hard_thresholds(),
            signal_crisis_thresholds: default_signal_crisis_thresholds(),
            signal_urgency_threshold: default_signal_urgency_threshold(),
            signal_urgency_weight: default_signal_urgency_weight(),
            slope_window: default_slope_window(),
            slope_gain: default_slope_gain(),
            medium_band: default_medium_band(),
            high_band: default_high_band(),
            crisis_keywords: default_crisis_keywords(),
        }
    }
}

fn default_urgency_weights() -> BTreeMap<Emotion, f64> {
    BTreeMap::from([
        (Emotion::SelfHarmImpulse, 0.5),
        (Emotion::Hopelessness, 0.35),
        (Emotion::Agitation, 0.2),
        (Emotion::Emptiness, 0.1),
        (Emotion::Sadness, 0.1),
        (Emotion::Anxiety, 0.1),
    ])
}

fn default_hard_thresholds() -> BTreeMap<Emotion, f64> {
    BTreeMap::from([(Emotion::SelfHarmImpulse, 0.8), (Emotion::Hopelessness, 0.9)])
}

fn default_signal_crisis_thresholds() -> BTreeMap<SignalName, f64> {
    BTreeMap::from([
        (SignalName::SelfHarmRisk, 0.7),
        (SignalName::HopelessnessSignal, 0.8),
        (SignalName::DissociationLevel, 0.85),
    ])
}

fn default_signal_urgency_threshold() -> f64 {
    0.4
}

fn default_signal_urgency_weight() -> f64 {
    0.15
}

fn default_slope_window() -> usize {
    5
}

fn default_slope_gain() -> f64 {
    2.0
}

fn default_medium_band() -> f64 {
    0.4
}

fn default_high_band() -> f64 {
    0.7
}

fn default_crisis_keywords() -> Vec<String> {
    DEFAULT_CRISIS_KEYWORDS.clone()
}
