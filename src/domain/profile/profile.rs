//! UserProfile aggregate - longitudinal emotional state per user.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::config::ProfileConfig;
use crate::domain::emotion::Emotion;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::fusion::FusedAssessment;
use crate::domain::risk::{RiskLevel, RoutingLevel};

use super::stats::{EmaMean, WelfordStats};

/// One retained interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: Timestamp,
    pub assessment: FusedAssessment,
    pub risk_level: RiskLevel,
}

/// Five-trait personality estimate, each in [0, 1], drifting slowly from
/// aggregate patterns. A rough proxy, not a psychometric instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            openness: 0.5,
            conscientiousness: 0.5,
            extraversion: 0.5,
            agreeableness: 0.5,
            neuroticism: 0.5,
        }
    }
}

fn drift(trait_value: &mut f64, delta: f64) {
    *trait_value = (*trait_value + delta).clamp(0.0, 1.0);
}

/// Longitudinal emotional profile. Exactly one per user id; owned and
/// serialized by the profile store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    baseline: BTreeMap<Emotion, EmaMean>,
    variance_stats: BTreeMap<Emotion, WelfordStats>,
    pub total_interactions: u64,
    pub crisis_count: u64,
    pub intervention_count: u64,
    history: VecDeque<HistoryEntry>,
    pub personality: Personality,
}

impl UserProfile {
    /// Fresh zeroed profile for a user never seen before.
    pub fn new(user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            user_id,
            created_at: now,
            updated_at: now,
            baseline: BTreeMap::new(),
            variance_stats: BTreeMap::new(),
            total_interactions: 0,
            crisis_count: 0,
            intervention_count: 0,
            history: VecDeque::new(),
            personality: Personality::default(),
        }
    }

    /// Folds one completed interaction into the profile.
    ///
    /// Intentionally not idempotent: every call moves the baseline, the
    /// variance stats, and the counters, and appends to history.
    pub fn apply_interaction(
        &mut self,
        fused: &FusedAssessment,
        risk_level: RiskLevel,
        routing_level: RoutingLevel,
        config: &ProfileConfig,
    ) {
        self.updated_at = Timestamp::now();
        let alpha = config.baseline_alpha();
        for (emotion, intensity) in fused.vector.iter() {
            self.baseline
                .entry(emotion)
                .or_default()
                .update(alpha, intensity.value());
            self.variance_stats
                .entry(emotion)
                .or_default()
                .update(intensity.value());
        }

        self.total_interactions += 1;
        match routing_level {
            RoutingLevel::Crisis => self.crisis_count += 1,
            RoutingLevel::Intervention => self.intervention_count += 1,
            RoutingLevel::Quick => {}
        }

        self.history.push_back(HistoryEntry {
            timestamp: fused.created_at,
            assessment: fused.clone(),
            risk_level,
        });
        while self.history.len() > config.history_cap {
            self.history.pop_front();
        }

        self.drift_personality(config.personality_drift_step);
    }

    /// EMA baseline for an emotion; 0.0 before any interaction.
    pub fn baseline(&self, emotion: Emotion) -> f64 {
        self.baseline.get(&emotion).map_or(0.0, |ema| ema.value())
    }

    /// Incremental variance for an emotion; 0.0 before two interactions.
    pub fn variance(&self, emotion: Emotion) -> f64 {
        self.variance_stats
            .get(&emotion)
            .map_or(0.0, |s| s.variance())
    }

    /// The last `n` history entries in chronological order.
    pub fn recent_history(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().skip(self.history.len().saturating_sub(n))
    }

    /// Full retained history, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Small fixed drift per interaction from aggregate patterns. This is
    /// a coarse proxy: sustained anxious or fearful baselines push
    /// neuroticism up, high variance pulls the conscientiousness proxy
    /// down, lonely baselines pull extraversion down, hostile baselines
    /// pull agreeableness down.
    fn drift_personality(&mut self, step: f64) {
        let anxious = (self.baseline(Emotion::Anxiety) + self.baseline(Emotion::Fear)) / 2.0;
        if anxious > 0.5 {
            drift(&mut self.personality.neuroticism, step);
        } else if anxious < 0.2 {
            drift(&mut self.personality.neuroticism, -step);
        }

        let mean_variance = Emotion::ALL
            .iter()
            .map(|e| self.variance(*e))
            .sum::<f64>()
            / Emotion::ALL.len() as f64;
        if mean_variance > 0.05 {
            drift(&mut self.personality.conscientiousness, -step);
        }

        if self.baseline(Emotion::Loneliness) > 0.5 {
            drift(&mut self.personality.extraversion, -step);
        }

        let hostile = (self.baseline(Emotion::Anger) + self.baseline(Emotion::Agitation)) / 2.0;
        if hostile > 0.5 {
            drift(&mut self.personality.agreeableness, -step);
        }
    }
}
