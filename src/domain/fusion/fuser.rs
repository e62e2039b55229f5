//! ModalityFuser - weighted combination of modality readings into one
//! assessment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{FusionConfig, FusionMode};
use crate::domain::emotion::{Emotion, EmotionVector, Modality, ModalityReading};
use crate::domain::foundation::{AssessmentId, Intensity, Timestamp};

/// Floor applied to adaptive weights so a zero-confidence reading never
/// silently vanishes from the audit trail.
const MIN_ADAPTIVE_WEIGHT: f64 = 0.05;

/// One fused, taxonomy-wide emotional estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedAssessment {
    pub id: AssessmentId,
    pub vector: EmotionVector,
    /// Contributing modalities with their final weights; sums to 1.0.
    pub weights: Vec<(Modality, f64)>,
    pub dominant_emotion: Emotion,
    /// Set when a sole non-text modality was promoted to primary.
    pub folded_from: Option<Modality>,
    pub created_at: Timestamp,
}

impl FusedAssessment {
    pub fn weight_of(&self, modality: Modality) -> Option<f64> {
        self.weights
            .iter()
            .find(|(m, _)| *m == modality)
            .map(|(_, w)| *w)
    }
}

/// Errors from fusion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FusionError {
    #[error("no modality data to fuse")]
    NoModalityData,
}

/// Combines modality readings into a [`FusedAssessment`].
#[derive(Debug, Clone)]
pub struct ModalityFuser {
    config: FusionConfig,
}

impl ModalityFuser {
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    /// Fuses readings using the configured mode.
    ///
    /// A single reading passes through with weight exactly 1.0 regardless
    /// of mode; a sole non-text reading is additionally annotated as folded
    /// into the primary position.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::NoModalityData`] for an empty reading set.
    pub fn fuse(&self, readings: &[ModalityReading]) -> Result<FusedAssessment, FusionError> {
        if readings.is_empty() {
            return Err(FusionError::NoModalityData);
        }

        let weights = self.resolve_weights(readings);
        let mut vector = EmotionVector::default();
        let mut arousal = 0.0;
        let mut confidence = 0.0;
        for (reading, weight) in readings.iter().zip(weights.iter()) {
            for (emotion, intensity) in reading.vector.iter() {
                let current = vector.get(emotion).value();
                vector.set(emotion, Intensity::new(current + weight * intensity.value()));
            }
            arousal += weight * reading.vector.arousal().value();
            confidence += weight * reading.vector.confidence().value();
        }
        vector.set_arousal(Intensity::new(arousal));
        vector.set_confidence(Intensity::new(confidence));

        let folded_from = match readings {
            [only] if only.modality != Modality::Text => Some(only.modality),
            _ => None,
        };

        Ok(FusedAssessment {
            id: AssessmentId::new(),
            dominant_emotion: vector.dominant_emotion(),
            vector,
            weights: readings
                .iter()
                .map(|r| r.modality)
                .zip(weights)
                .collect(),
            folded_from,
            created_at: Timestamp::now(),
        })
    }

    /// Final per-reading weights, renormalized to sum to 1.0.
    fn resolve_weights(&self, readings: &[ModalityReading]) -> Vec<f64> {
        if readings.len() == 1 {
            return vec![1.0];
        }
        let raw: Vec<f64> = readings
            .iter()
            .map(|r| {
                let base = self.config.base_weight(r.modality);
                match self.config.mode {
                    FusionMode::Fixed => base,
                    FusionMode::Adaptive => {
                        (base * r.source.confidence().value()).max(MIN_ADAPTIVE_WEIGHT)
                    }
                }
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        if sum <= 0.0 {
            // Degenerate configuration; fall back to equal weights.
            return vec![1.0 / readings.len() as f64; readings.len()];
        }
        raw.into_iter().map(|w| w / sum).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::EstimationSource;

    fn reading(modality: Modality, emotion: Emotion, value: f64, confidence: f64) -> ModalityReading {
        let mut vector = EmotionVector::neutral(Intensity::new(confidence));
        vector.set(emotion, Intensity::new(value));
        vector.set_arousal(Intensity::new(value));
        ModalityReading::new(
            modality,
            vector,
            EstimationSource::ExternalModel {
                confidence: Intensity::new(confidence),
            },
        )
    }

    fn fuser(mode: FusionMode) -> ModalityFuser {
        ModalityFuser::new(FusionConfig {
            mode,
            ..FusionConfig::default()
        })
    }

    #[test]
    fn empty_readings_are_rejected() {
        assert_eq!(
            fuser(FusionMode::Fixed).fuse(&[]).unwrap_err(),
            FusionError::NoModalityData
        );
    }

    #[test]
    fn single_reading_is_identity_with_weight_one() {
        let r = reading(Modality::Text, Emotion::Sadness, 0.7, 0.9);
        let fused = fuser(FusionMode::Adaptive).fuse(&[r.clone()]).unwrap();
        assert_eq!(fused.weights, vec![(Modality::Text, 1.0)]);
        assert_eq!(fused.vector.get(Emotion::Sadness).value(), 0.7);
        assert!(fused.folded_from.is_none());
    }

    #[test]
    fn sole_non_text_reading_is_folded() {
        let r = reading(Modality::Audio, Emotion::Agitation, 0.6, 0.5);
        let fused = fuser(FusionMode::Fixed).fuse(&[r]).unwrap();
        assert_eq!(fused.folded_from, Some(Modality::Audio));
        assert_eq!(fused.weight_of(Modality::Audio), Some(1.0));
    }

    #[test]
    fn fixed_weights_renormalize_over_present_modalities() {
        let readings = vec![
            reading(Modality::Text, Emotion::Sadness, 0.8, 0.9),
            reading(Modality::Audio, Emotion::Sadness, 0.4, 0.9),
        ];
        let fused = fuser(FusionMode::Fixed).fuse(&readings).unwrap();
        // text 0.6 and audio 0.25 renormalize to ~0.706 / ~0.294
        let text_w = fused.weight_of(Modality::Text).unwrap();
        let audio_w = fused.weight_of(Modality::Audio).unwrap();
        assert!((text_w + audio_w - 1.0).abs() < 1e-9);
        assert!((text_w - 0.6 / 0.85).abs() < 1e-9);
        let expected = text_w * 0.8 + audio_w * 0.4;
        assert!((fused.vector.get(Emotion::Sadness).value() - expected).abs() < 1e-9);
    }

    #[test]
    fn adaptive_mode_discounts_low_confidence_readings() {
        let readings = vec![
            reading(Modality::Text, Emotion::Sadness, 0.8, 0.9),
            reading(Modality::Audio, Emotion::Sadness, 0.4, 0.1),
        ];
        let adaptive = fuser(FusionMode::Adaptive).fuse(&readings).unwrap();
        let fixed = fuser(FusionMode::Fixed).fuse(&readings).unwrap();
        assert!(
            adaptive.weight_of(Modality::Audio).unwrap()
                < fixed.weight_of(Modality::Audio).unwrap()
        );
    }

    #[test]
    fn fused_values_stay_in_unit_range() {
        let readings = vec![
            reading(Modality::Text, Emotion::Anxiety, 1.0, 1.0),
            reading(Modality::Audio, Emotion::Anxiety, 1.0, 1.0),
            reading(Modality::Image, Emotion::Anxiety, 1.0, 1.0),
        ];
        let fused = fuser(FusionMode::Adaptive).fuse(&readings).unwrap();
        for (_, intensity) in fused.vector.iter() {
            assert!((0.0..=1.0).contains(&intensity.value()));
        }
        let sum: f64 = fused.weights.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dominant_emotion_uses_crisis_tie_break() {
        let mut vector = EmotionVector::neutral(Intensity::MAX);
        vector.set(Emotion::Hopelessness, Intensity::new(0.5));
        vector.set(Emotion::Loneliness, Intensity::new(0.5));
        let r = ModalityReading::new(
            Modality::Text,
            vector,
            EstimationSource::RuleFallback,
        );
        let fused = fuser(FusionMode::Fixed).fuse(&[r]).unwrap();
        assert_eq!(fused.dominant_emotion, Emotion::Hopelessness);
    }
}
