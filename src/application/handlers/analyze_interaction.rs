//! AnalyzeInteractionHandler - the full analysis pipeline for one
//! interaction: normalize, fuse, assess, route, update profile.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::domain::emotion::{Modality, RiskSignals};
use crate::domain::foundation::UserId;
use crate::domain::fusion::{
    FeatureNormalizer, FusedAssessment, FusionError, ModalityFuser, NormalizeError,
    RawModalityInput,
};
use crate::domain::profile::UserProfile;
use crate::domain::risk::{IntelligentRouter, RiskAssessment, RiskAssessor, RoutingDecision};
use crate::ports::{ProfileStore, ProfileStoreError};

/// Command to analyze one user interaction
#[derive(Debug, Clone)]
pub struct AnalyzeInteractionCommand {
    pub user_id: UserId,
    pub inputs: Vec<RawModalityInput>,
    /// Caller-supplied risk signals, fed to assessment as-is.
    pub signals: RiskSignals,
    /// Free-form context text, scanned for crisis keywords.
    pub context: Option<String>,
}

impl AnalyzeInteractionCommand {
    pub fn text_only(user_id: UserId, content: impl Into<String>) -> Self {
        Self {
            user_id,
            inputs: vec![RawModalityInput::text(content)],
            signals: RiskSignals::new(),
            context: None,
        }
    }
}

/// Outcome of one analyzed interaction
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub fused: FusedAssessment,
    pub risk: RiskAssessment,
    pub routing: RoutingDecision,
    /// Profile state after this interaction was folded in.
    pub profile_snapshot: UserProfile,
}

/// Error type for the analysis pipeline
#[derive(Debug, Error)]
pub enum AnalyzeInteractionError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Fusion(#[from] FusionError),

    #[error(transparent)]
    Store(#[from] ProfileStoreError),
}

/// Handler for the analysis pipeline
///
/// The profile update happens strictly after routing, and the assessor
/// only ever sees the pre-update snapshot. Nothing is written to the
/// store if any earlier stage fails.
pub struct AnalyzeInteractionHandler {
    normalizer: FeatureNormalizer,
    fuser: ModalityFuser,
    assessor: RiskAssessor,
    router: IntelligentRouter,
    store: Arc<dyn ProfileStore>,
}

impl AnalyzeInteractionHandler {
    pub fn new(config: EngineConfig, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            normalizer: FeatureNormalizer::new(config.fusion.clone()),
            fuser: ModalityFuser::new(config.fusion),
            assessor: RiskAssessor::new(config.risk.clone()),
            router: IntelligentRouter::new(config.routing, config.risk),
            store,
        }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeInteractionCommand,
    ) -> Result<AnalysisOutcome, AnalyzeInteractionError> {
        if cmd.inputs.is_empty() {
            return Err(FusionError::NoModalityData.into());
        }

        let readings = self.normalize_all(&cmd.inputs)?;
        let fused = self.fuser.fuse(&readings)?;

        let context = cmd.context.as_deref();
        let snapshot = self.store.get(&cmd.user_id).await?;
        let risk = self.assessor.assess(&fused, &cmd.signals, &snapshot, context);
        let routing = self.router.route(risk.level, &fused, context);

        let profile_snapshot = self
            .store
            .update(&cmd.user_id, &fused, risk.level, routing.level)
            .await?;

        info!(
            user_id = %cmd.user_id,
            assessment_id = %fused.id,
            dominant = %fused.dominant_emotion,
            risk = %risk.level,
            routing = %routing.level,
            reason = %routing.reason,
            "interaction analyzed"
        );

        Ok(AnalysisOutcome {
            fused,
            risk,
            routing,
            profile_snapshot,
        })
    }

    /// Normalizes every input. A failed non-text modality degrades to the
    /// remaining readings with a warning as long as a text reading exists;
    /// any other failure aborts the analysis.
    fn normalize_all(
        &self,
        inputs: &[RawModalityInput],
    ) -> Result<Vec<crate::domain::emotion::ModalityReading>, AnalyzeInteractionError> {
        let mut readings = Vec::with_capacity(inputs.len());
        let mut deferred: Option<NormalizeError> = None;

        for input in inputs {
            match self.normalizer.normalize(input) {
                Ok(reading) => readings.push(reading),
                Err(e) if input.modality() != Modality::Text => {
                    warn!(modality = %input.modality(), error = %e, "modality degraded");
                    deferred.get_or_insert(e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        let has_text = readings.iter().any(|r| r.modality == Modality::Text);
        match deferred {
            Some(e) if !has_text => Err(e.into()),
            _ => Ok(readings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::profile::InMemoryProfileStore;
    use crate::domain::emotion::{AcousticFeatures, Emotion};
    use crate::domain::risk::{RiskLevel, RoutingLevel};
    use std::collections::HashMap;

    fn handler() -> AnalyzeInteractionHandler {
        AnalyzeInteractionHandler::new(
            EngineConfig::default(),
            Arc::new(InMemoryProfileStore::new(Default::default())),
        )
    }

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[tokio::test]
    async fn empty_inputs_are_rejected() {
        let cmd = AnalyzeInteractionCommand {
            user_id: user(),
            inputs: vec![],
            signals: RiskSignals::new(),
            context: None,
        };
        assert!(matches!(
            handler().handle(cmd).await,
            Err(AnalyzeInteractionError::Fusion(FusionError::NoModalityData))
        ));
    }

    #[tokio::test]
    async fn positive_text_routes_quick() {
        let cmd = AnalyzeInteractionCommand::text_only(user(), "我今天很开心");
        let outcome = handler().handle(cmd).await.unwrap();
        assert_eq!(outcome.risk.level, RiskLevel::Low);
        assert_eq!(outcome.routing.level, RoutingLevel::Quick);
        assert_eq!(outcome.profile_snapshot.total_interactions, 1);
    }

    #[tokio::test]
    async fn crisis_keyword_in_context_routes_crisis() {
        let mut cmd = AnalyzeInteractionCommand::text_only(user(), "最近压力很大");
        cmd.context = Some("有时候觉得不想活了".to_string());
        let outcome = handler().handle(cmd).await.unwrap();
        assert_eq!(outcome.risk.level, RiskLevel::Critical);
        assert_eq!(outcome.routing.level, RoutingLevel::Crisis);
    }

    #[tokio::test]
    async fn failed_audio_degrades_to_text_with_text_present() {
        let cmd = AnalyzeInteractionCommand {
            user_id: user(),
            inputs: vec![
                RawModalityInput::text("I feel so hopeless"),
                RawModalityInput::Audio { features: None },
            ],
            signals: RiskSignals::new(),
            context: None,
        };
        let outcome = handler().handle(cmd).await.unwrap();
        assert_eq!(outcome.fused.weights.len(), 1);
        assert!(outcome.fused.vector.get(Emotion::Hopelessness).value() > 0.0);
    }

    #[tokio::test]
    async fn failed_audio_without_text_aborts() {
        let cmd = AnalyzeInteractionCommand {
            user_id: user(),
            inputs: vec![RawModalityInput::Audio { features: None }],
            signals: RiskSignals::new(),
            context: None,
        };
        assert!(matches!(
            handler().handle(cmd).await,
            Err(AnalyzeInteractionError::Normalize(_))
        ));
    }

    #[tokio::test]
    async fn failed_text_aborts_even_with_other_modalities() {
        let cmd = AnalyzeInteractionCommand {
            user_id: user(),
            inputs: vec![
                RawModalityInput::text("  "),
                RawModalityInput::Audio {
                    features: Some(AcousticFeatures {
                        pitch_mean: 200.0,
                        pitch_std: 20.0,
                        energy: 0.5,
                        spectral_centroid: 1500.0,
                    }),
                },
            ],
            signals: RiskSignals::new(),
            context: None,
        };
        assert!(matches!(
            handler().handle(cmd).await,
            Err(AnalyzeInteractionError::Normalize(_))
        ));
    }

    #[tokio::test]
    async fn external_scores_above_hard_threshold_route_crisis() {
        let scores = HashMap::from([("self_harm_impulse".to_string(), 0.85)]);
        let cmd = AnalyzeInteractionCommand {
            user_id: user(),
            inputs: vec![RawModalityInput::Text {
                content: "...".into(),
                scores: Some(scores),
                model_confidence: Some(0.9),
            }],
            signals: RiskSignals::new(),
            context: None,
        };
        let outcome = handler().handle(cmd).await.unwrap();
        assert_eq!(outcome.risk.level, RiskLevel::Critical);
        assert_eq!(outcome.routing.level, RoutingLevel::Crisis);
        assert_eq!(outcome.profile_snapshot.crisis_count, 1);
    }
}
