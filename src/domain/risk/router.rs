//! IntelligentRouter - stateless mapping from risk to a response tier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{RiskConfig, RoutingConfig};
use crate::domain::fusion::FusedAssessment;

use super::RiskLevel;

/// Response tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingLevel {
    Quick,
    Intervention,
    Crisis,
}

impl RoutingLevel {
    pub fn name(&self) -> &'static str {
        match self {
            RoutingLevel::Quick => "QUICK",
            RoutingLevel::Intervention => "INTERVENTION",
            RoutingLevel::Crisis => "CRISIS",
        }
    }

    /// Deterministic per-level action hint.
    pub fn suggested_action(&self) -> &'static str {
        match self {
            RoutingLevel::Quick => "send a brief supportive reply",
            RoutingLevel::Intervention => "start a guided regulation exercise",
            RoutingLevel::Crisis => "activate the crisis protocol and notify a human reviewer",
        }
    }
}

impl fmt::Display for RoutingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Routing outcome. `reason` names the exact rule that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub level: RoutingLevel,
    pub reason: String,
    pub suggested_action: String,
    pub risk_level: RiskLevel,
}

impl RoutingDecision {
    fn new(level: RoutingLevel, reason: String, risk_level: RiskLevel) -> Self {
        Self {
            level,
            reason,
            suggested_action: level.suggested_action().to_string(),
            risk_level,
        }
    }
}

/// Routes assessed interactions to one of the three tiers. Stateless;
/// rules are evaluated in fixed order and the first hit wins.
#[derive(Debug, Clone)]
pub struct IntelligentRouter {
    config: RoutingConfig,
    risk: RiskConfig,
}

impl IntelligentRouter {
    pub fn new(config: RoutingConfig, risk: RiskConfig) -> Self {
        Self { config, risk }
    }

    pub fn route(
        &self,
        risk_level: RiskLevel,
        fused: &FusedAssessment,
        context: Option<&str>,
    ) -> RoutingDecision {
        if risk_level == RiskLevel::Critical {
            return RoutingDecision::new(
                RoutingLevel::Crisis,
                "risk level CRITICAL".to_string(),
                risk_level,
            );
        }

        // Independent keyword scan. Even if the assessor missed it, a
        // crisis phrase in context routes to crisis.
        if let Some(keyword) = context.and_then(|c| self.risk.matches_crisis_keyword(c)) {
            return RoutingDecision::new(
                RoutingLevel::Crisis,
                format!("crisis keyword: \"{keyword}\""),
                risk_level,
            );
        }

        if risk_level == RiskLevel::High {
            return RoutingDecision::new(
                RoutingLevel::Intervention,
                "risk level HIGH".to_string(),
                risk_level,
            );
        }

        if risk_level == RiskLevel::Medium {
            let count = fused
                .vector
                .count_at_least(self.config.multi_indicator_threshold);
            if count >= self.config.multi_indicator_count {
                return RoutingDecision::new(
                    RoutingLevel::Intervention,
                    format!(
                        "multi-indicator: {count} emotions >= {:.2}",
                        self.config.multi_indicator_threshold
                    ),
                    risk_level,
                );
            }
        }

        let arousal = fused.vector.arousal().value();
        let dominant = fused.vector.get(fused.dominant_emotion).value();
        if arousal > self.config.high_arousal && dominant > self.config.dominant_floor {
            return RoutingDecision::new(
                RoutingLevel::Intervention,
                format!(
                    "high arousal {arousal:.2} with {} at {dominant:.2}",
                    fused.dominant_emotion
                ),
                risk_level,
            );
        }

        RoutingDecision::new(
            RoutingLevel::Quick,
            "no escalation rule fired".to_string(),
            risk_level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::{Emotion, EmotionVector, Modality};
    use crate::domain::foundation::{AssessmentId, Intensity, Timestamp};

    fn fused(entries: &[(Emotion, f64)], arousal: f64) -> FusedAssessment {
        let mut vector = EmotionVector::neutral(Intensity::MAX);
        for (emotion, value) in entries {
            vector.set(*emotion, Intensity::new(*value));
        }
        vector.set_arousal(Intensity::new(arousal));
        FusedAssessment {
            id: AssessmentId::new(),
            dominant_emotion: vector.dominant_emotion(),
            vector,
            weights: vec![(Modality::Text, 1.0)],
            folded_from: None,
            created_at: Timestamp::now(),
        }
    }

    fn router() -> IntelligentRouter {
        IntelligentRouter::new(RoutingConfig::default(), RiskConfig::default())
    }

    #[test]
    fn critical_always_routes_to_crisis() {
        let decision = router().route(RiskLevel::Critical, &fused(&[], 0.0), None);
        assert_eq!(decision.level, RoutingLevel::Crisis);
        assert_eq!(decision.reason, "risk level CRITICAL");
    }

    #[test]
    fn context_keyword_routes_to_crisis_regardless_of_risk() {
        let decision = router().route(
            RiskLevel::Low,
            &fused(&[], 0.0),
            Some("sometimes I think I want to end it"),
        );
        assert_eq!(decision.level, RoutingLevel::Crisis);
        assert!(decision.reason.contains("crisis keyword"));
    }

    #[test]
    fn high_risk_routes_to_intervention() {
        let decision = router().route(RiskLevel::High, &fused(&[(Emotion::Sadness, 0.6)], 0.3), None);
        assert_eq!(decision.level, RoutingLevel::Intervention);
        assert_eq!(decision.reason, "risk level HIGH");
    }

    #[test]
    fn medium_with_multiple_indicators_routes_to_intervention() {
        let f = fused(&[(Emotion::Sadness, 0.55), (Emotion::Anxiety, 0.5)], 0.3);
        let decision = router().route(RiskLevel::Medium, &f, None);
        assert_eq!(decision.level, RoutingLevel::Intervention);
        assert_eq!(decision.reason, "multi-indicator: 2 emotions >= 0.50");
    }

    #[test]
    fn medium_with_single_indicator_routes_to_quick() {
        let f = fused(&[(Emotion::Sadness, 0.55)], 0.3);
        let decision = router().route(RiskLevel::Medium, &f, None);
        assert_eq!(decision.level, RoutingLevel::Quick);
    }

    #[test]
    fn high_arousal_with_real_dominant_routes_to_intervention() {
        let f = fused(&[(Emotion::Agitation, 0.45)], 0.85);
        let decision = router().route(RiskLevel::Low, &f, None);
        assert_eq!(decision.level, RoutingLevel::Intervention);
        assert!(decision.reason.starts_with("high arousal"));
    }

    #[test]
    fn high_arousal_with_trivial_dominant_routes_to_quick() {
        let f = fused(&[(Emotion::Anxiety, 0.1)], 0.9);
        let decision = router().route(RiskLevel::Low, &f, None);
        assert_eq!(decision.level, RoutingLevel::Quick);
    }

    #[test]
    fn suggested_action_is_keyed_by_level() {
        let decision = router().route(RiskLevel::Critical, &fused(&[], 0.0), None);
        assert_eq!(
            decision.suggested_action,
            RoutingLevel::Crisis.suggested_action()
        );
    }
}
