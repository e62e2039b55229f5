//! ProfileReport - analytics derived from retained history only.
//!
//! Every figure here is computed from what the profile currently holds.
//! Insufficient data yields neutral defaults, never errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::emotion::Emotion;
use crate::domain::foundation::{Timestamp, UserId};

use super::profile::{HistoryEntry, Personality, UserProfile};

/// Entries required before trend and cycle figures are reported.
const MIN_TREND_ENTRIES: usize = 3;
const MIN_CYCLE_ENTRIES: usize = 6;

/// History window for trend, stability, and warning derivation.
const RECENT_WINDOW: usize = 20;

/// Volatility threshold on the load standard deviation.
const VOLATILE_STD: f64 = 0.15;

/// Slope magnitude below which the trend counts as stable.
const STABLE_SLOPE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
    Volatile,
}

/// Least-squares trend over the recent negative-load series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Load change per interaction.
    pub slope: f64,
    /// Grows with the amount of history backing the figure, capped at 1.0.
    pub confidence: f64,
}

impl Default for Trend {
    fn default() -> Self {
        Self {
            direction: TrendDirection::Stable,
            slope: 0.0,
            confidence: 0.0,
        }
    }
}

/// Time-of-day and weekday aggregation over retained history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cycles {
    /// UTC hour with the highest mean load.
    pub peak_hour: Option<u32>,
    /// UTC hour with the lowest mean load.
    pub low_hour: Option<u32>,
    pub peak_weekday: Option<String>,
    /// Dispersion across hourly bucket means; 0.0 means no daily pattern.
    pub strength: f64,
}

/// Derived analytics snapshot for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub user_id: UserId,
    pub baseline: BTreeMap<Emotion, f64>,
    pub trend: Trend,
    pub cycles: Cycles,
    /// Historical crisis ratio, a crude forward-looking probability.
    pub risk_prediction_probability: f64,
    pub early_warning_signals: Vec<String>,
    pub personality: Personality,
    /// 1.0 means settled arousal; falls with arousal dispersion.
    pub stability_score: f64,
    pub total_interactions: u64,
    pub crisis_count: u64,
    pub intervention_count: u64,
    pub generated_at: Timestamp,
}

impl ProfileReport {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let recent: Vec<&HistoryEntry> = profile.recent_history(RECENT_WINDOW).collect();
        let loads: Vec<f64> = recent.iter().map(|e| entry_load(e)).collect();

        let trend = derive_trend(&loads);
        let cycles = derive_cycles(profile);
        let stability_score = derive_stability(&recent);
        let risk_prediction_probability = if profile.total_interactions == 0 {
            0.0
        } else {
            (profile.crisis_count as f64 / profile.total_interactions as f64).clamp(0.0, 1.0)
        };
        let early_warning_signals = derive_warnings(&trend, &loads, &recent);

        Self {
            user_id: profile.user_id.clone(),
            baseline: Emotion::ALL
                .iter()
                .map(|e| (*e, profile.baseline(*e)))
                .collect(),
            trend,
            cycles,
            risk_prediction_probability,
            early_warning_signals,
            personality: profile.personality,
            stability_score,
            total_interactions: profile.total_interactions,
            crisis_count: profile.crisis_count,
            intervention_count: profile.intervention_count,
            generated_at: Timestamp::now(),
        }
    }
}

/// Negative load of one retained entry: the peak emotion intensity.
fn entry_load(entry: &HistoryEntry) -> f64 {
    entry.assessment.vector.peak_intensity().value()
}

fn mean_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_of(values);
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Least-squares slope over evenly spaced observations.
fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = mean_of(values);
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

fn derive_trend(loads: &[f64]) -> Trend {
    if loads.len() < MIN_TREND_ENTRIES {
        return Trend::default();
    }
    let slope = least_squares_slope(loads);

    // Volatility is scatter around the fitted line, so a clean steep rise
    // still reads as rising rather than volatile.
    let x_mean = (loads.len() as f64 - 1.0) / 2.0;
    let y_mean = mean_of(loads);
    let residuals: Vec<f64> = loads
        .iter()
        .enumerate()
        .map(|(i, y)| y - (y_mean + slope * (i as f64 - x_mean)))
        .collect();

    let direction = if std_dev(&residuals) > VOLATILE_STD {
        TrendDirection::Volatile
    } else if slope > STABLE_SLOPE {
        TrendDirection::Rising
    } else if slope < -STABLE_SLOPE {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    };
    Trend {
        direction,
        slope,
        confidence: (loads.len() as f64 / RECENT_WINDOW as f64).min(1.0),
    }
}

fn derive_cycles(profile: &UserProfile) -> Cycles {
    if profile.history_len() < MIN_CYCLE_ENTRIES {
        return Cycles::default();
    }

    let mut hour_buckets: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    let mut weekday_buckets: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for entry in profile.history() {
        let load = entry_load(entry);
        hour_buckets
            .entry(entry.timestamp.hour_of_day())
            .or_default()
            .push(load);
        weekday_buckets
            .entry(entry.timestamp.weekday().num_days_from_monday() as u8)
            .or_default()
            .push(load);
    }

    let hour_means: Vec<(u32, f64)> = hour_buckets
        .iter()
        .map(|(hour, loads)| (*hour, mean_of(loads)))
        .collect();
    let peak_hour = hour_means
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| *h);
    let low_hour = hour_means
        .iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| *h);
    let peak_weekday = weekday_buckets
        .iter()
        .map(|(day, loads)| (*day, mean_of(loads)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(day, _)| weekday_name(day).to_string());

    let means: Vec<f64> = hour_means.iter().map(|(_, m)| *m).collect();
    Cycles {
        peak_hour,
        low_hour,
        peak_weekday,
        strength: std_dev(&means).clamp(0.0, 1.0),
    }
}

fn weekday_name(num_from_monday: u8) -> &'static str {
    match num_from_monday {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        _ => "Sunday",
    }
}

fn derive_stability(recent: &[&HistoryEntry]) -> f64 {
    if recent.len() < 2 {
        return 0.5;
    }
    let arousals: Vec<f64> = recent
        .iter()
        .map(|e| e.assessment.vector.arousal().value())
        .collect();
    (1.0 - std_dev(&arousals) / 0.5).clamp(0.0, 1.0)
}

fn derive_warnings(trend: &Trend, loads: &[f64], recent: &[&HistoryEntry]) -> Vec<String> {
    let mut warnings = Vec::new();
    if trend.direction == TrendDirection::Rising {
        warnings.push("rising negative trend".to_string());
    }
    if loads.len() >= MIN_TREND_ENTRIES && mean_of(loads) > 0.25 {
        warnings.push("sustained negative load".to_string());
    }
    if trend.direction == TrendDirection::Volatile {
        warnings.push("high volatility".to_string());
    }
    let impulse_hits = recent
        .iter()
        .filter(|e| e.assessment.vector.get(Emotion::SelfHarmImpulse).value() >= 0.5)
        .count();
    if impulse_hits >= 2 {
        warnings.push("repeated self-harm impulse".to_string());
    }
    warnings
}
