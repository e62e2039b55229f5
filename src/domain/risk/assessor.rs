//! RiskAssessor - maps a fused assessment onto a risk level.
//!
//! Hard crisis overrides run first and are never weakened by averaging.
//! Below the overrides, a weighted urgency score over the crisis-relevant
//! emotions, elevated signals, and the recent trajectory slope selects the
//! band.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RiskConfig;
use crate::domain::emotion::{EmotionVector, RiskSignals};
use crate::domain::fusion::FusedAssessment;
use crate::domain::profile::UserProfile;

/// Risk band, ordered from lowest to highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Assessment outcome with its ordered audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Urgency score in [0, 1]; pinned to 1.0 on a hard override.
    pub urgency: f64,
    /// Trajectory slope that contributed to the urgency (0.0 without
    /// sufficient history).
    pub slope: f64,
    /// Rules that fired, in evaluation order.
    pub trigger_reasons: Vec<String>,
}

/// Computes risk from fused emotions, signals, profile history, and context.
#[derive(Debug, Clone)]
pub struct RiskAssessor {
    config: RiskConfig,
}

impl RiskAssessor {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Crisis-relevant level of a vector: the urgency-weighted emotion sum.
    pub fn crisis_level(&self, vector: &EmotionVector) -> f64 {
        self.config
            .urgency_weights
            .iter()
            .map(|(emotion, weight)| weight * vector.get(*emotion).value())
            .sum()
    }

    /// Assesses risk. Infallible: malformed numeric input degrades upward,
    /// never to an error.
    pub fn assess(
        &self,
        fused: &FusedAssessment,
        signals: &RiskSignals,
        profile: &UserProfile,
        context: Option<&str>,
    ) -> RiskAssessment {
        let mut reasons = Vec::new();

        if let Some(assessment) = self.hard_override(fused, signals, context, &mut reasons) {
            return assessment;
        }

        let mut urgency = self.crisis_level(&fused.vector);
        if urgency > 0.0 {
            reasons.push(format!("weighted emotion urgency {urgency:.2}"));
        }

        for (name, value) in signals.iter() {
            if value.value() >= self.config.signal_urgency_threshold {
                urgency += self.config.signal_urgency_weight * value.value();
                reasons.push(format!("elevated signal {name} at {:.2}", value.value()));
            }
        }

        let slope = self.trajectory_slope(fused, profile);
        if slope != 0.0 {
            urgency += self.config.slope_gain * slope;
            reasons.push(format!("trajectory slope {slope:+.3}"));
        }

        // NaN cannot come from Intensity-backed vectors, but config weights
        // are raw floats; bias upward rather than guessing low.
        if urgency.is_nan() {
            urgency = self.config.high_band;
            reasons.push("non-finite urgency, degraded upward".to_string());
        }
        let urgency = urgency.clamp(0.0, 1.0);

        let level = if urgency >= self.config.high_band {
            RiskLevel::High
        } else if urgency >= self.config.medium_band {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        RiskAssessment {
            level,
            urgency,
            slope,
            trigger_reasons: reasons,
        }
    }

    /// Hard crisis checks. Any hit pins the level to CRITICAL.
    fn hard_override(
        &self,
        fused: &FusedAssessment,
        signals: &RiskSignals,
        context: Option<&str>,
        reasons: &mut Vec<String>,
    ) -> Option<RiskAssessment> {
        for (emotion, threshold) in &self.config.hard_thresholds {
            let value = fused.vector.get(*emotion).value();
            if value >= *threshold {
                reasons.push(format!(
                    "hard threshold: {emotion} {value:.2} >= {threshold:.2}"
                ));
            }
        }
        for (name, threshold) in &self.config.signal_crisis_thresholds {
            if let Some(value) = signals.get(*name) {
                if value.value() >= *threshold {
                    reasons.push(format!(
                        "crisis signal: {name} {:.2} >= {threshold:.2}",
                        value.value()
                    ));
                }
            }
        }
        if let Some(keyword) = context.and_then(|c| self.config.matches_crisis_keyword(c)) {
            reasons.push(format!("crisis keyword: \"{keyword}\""));
        }

        if reasons.is_empty() {
            return None;
        }
        Some(RiskAssessment {
            level: RiskLevel::Critical,
            urgency: 1.0,
            slope: 0.0,
            trigger_reasons: std::mem::take(reasons),
        })
    }

    /// Current crisis level minus the mean over the recent history window.
    /// Requires at least two history entries, else 0.0.
    fn trajectory_slope(&self, fused: &FusedAssessment, profile: &UserProfile) -> f64 {
        let recent: Vec<f64> = profile
            .recent_history(self.config.slope_window)
            .map(|entry| self.crisis_level(&entry.assessment.vector))
            .collect();
        if recent.len() < 2 {
            return 0.0;
        }
        let mean = recent.iter().sum::<f64>() / recent.len() as f64;
        self.crisis_level(&fused.vector) - mean
    }
}
