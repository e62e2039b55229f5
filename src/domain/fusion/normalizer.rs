//! FeatureNormalizer - maps raw per-modality input onto the shared taxonomy.
//!
//! Text prefers external model scores and falls back to a declarative
//! keyword table. Audio and image use coarse heuristics over low-level
//! features. All paths are pure and deterministic.

use std::collections::HashMap;
use thiserror::Error;

use crate::config::FusionConfig;
use crate::domain::emotion::{
    AcousticFeatures, Emotion, EstimationSource, EmotionVector, Modality, ModalityReading,
    RawSubFeatures, VisualFeatures,
};
use crate::domain::foundation::{Intensity, ValidationError};

/// Raw input for one modality, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawModalityInput {
    Text {
        content: String,
        /// External classifier scores keyed by wire emotion name.
        scores: Option<HashMap<String, f64>>,
        /// Confidence the external classifier reported for its scores.
        model_confidence: Option<f64>,
    },
    Audio {
        features: Option<AcousticFeatures>,
    },
    Image {
        features: Option<VisualFeatures>,
    },
}

impl RawModalityInput {
    pub fn modality(&self) -> Modality {
        match self {
            RawModalityInput::Text { .. } => Modality::Text,
            RawModalityInput::Audio { .. } => Modality::Audio,
            RawModalityInput::Image { .. } => Modality::Image,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        RawModalityInput::Text {
            content: content.into(),
            scores: None,
            model_confidence: None,
        }
    }
}

/// Errors from normalization.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid {modality} data: {reason}")]
    InvalidModalityData { modality: Modality, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Normalizes raw modality input into [`ModalityReading`]s.
#[derive(Debug, Clone)]
pub struct FeatureNormalizer {
    config: FusionConfig,
}

impl FeatureNormalizer {
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    /// Normalizes one raw input into a reading on the shared taxonomy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidModalityData` when required sub-features are missing
    /// and no fallback path exists for the modality.
    pub fn normalize(&self, input: &RawModalityInput) -> Result<ModalityReading, NormalizeError> {
        match input {
            RawModalityInput::Text {
                content,
                scores,
                model_confidence,
            } => self.normalize_text(content, scores.as_ref(), *model_confidence),
            RawModalityInput::Audio { features } => self.normalize_audio(*features),
            RawModalityInput::Image { features } => self.normalize_image(*features),
        }
    }

    fn normalize_text(
        &self,
        content: &str,
        scores: Option<&HashMap<String, f64>>,
        model_confidence: Option<f64>,
    ) -> Result<ModalityReading, NormalizeError> {
        let confidence = model_confidence.unwrap_or(1.0);
        let reading = match scores {
            Some(scores) if confidence >= self.config.min_model_confidence => {
                let confidence = Intensity::new(confidence);
                let vector = EmotionVector::from_score_map(scores, confidence)?;
                ModalityReading::new(
                    Modality::Text,
                    vector,
                    EstimationSource::ExternalModel { confidence },
                )
            }
            _ => {
                if content.trim().is_empty() {
                    return Err(NormalizeError::InvalidModalityData {
                        modality: Modality::Text,
                        reason: "no content and no usable score map".into(),
                    });
                }
                self.keyword_estimate(content)
            }
        };
        Ok(reading.with_raw(RawSubFeatures {
            text: Some(content.to_string()),
            ..Default::default()
        }))
    }

    /// Keyword-table estimate. Matching is case-insensitive substring search,
    /// which covers both the Chinese and English term lists.
    fn keyword_estimate(&self, content: &str) -> ModalityReading {
        let lowered = content.to_lowercase();
        let source = EstimationSource::RuleFallback;
        let mut vector = EmotionVector::neutral(source.confidence());
        for rule in &self.config.keyword_rules {
            let hit = rule.terms.iter().any(|t| lowered.contains(&t.to_lowercase()));
            if hit {
                vector.raise_to(rule.emotion, Intensity::new(rule.intensity));
            }
        }
        vector.set_arousal(vector.peak_intensity());
        ModalityReading::new(Modality::Text, vector, source)
    }

    /// Coarse acoustic heuristic. High pitch variance with high energy reads
    /// as agitation, flat low-pitched speech as sadness and hopelessness, a
    /// bright spectrum as tension.
    fn normalize_audio(
        &self,
        features: Option<AcousticFeatures>,
    ) -> Result<ModalityReading, NormalizeError> {
        let features = features.ok_or_else(|| NormalizeError::InvalidModalityData {
            modality: Modality::Audio,
            reason: "acoustic features missing".into(),
        })?;
        let h = &self.config.audio;
        let source = EstimationSource::RuleFallback;
        let mut vector = EmotionVector::neutral(source.confidence());
        let mut arousal = Intensity::new(features.energy);

        if features.pitch_std > h.high_pitch_std && features.energy > h.high_energy {
            vector.raise_to(Emotion::Agitation, Intensity::new(0.6));
            vector.raise_to(Emotion::Anxiety, Intensity::new(0.5));
            arousal = arousal.max_of(Intensity::new(0.8));
        }
        if features.energy < h.low_energy && features.pitch_mean < h.low_pitch_mean {
            vector.raise_to(Emotion::Sadness, Intensity::new(0.55));
            vector.raise_to(Emotion::Hopelessness, Intensity::new(0.35));
        }
        if features.spectral_centroid > h.bright_centroid {
            vector.raise_to(Emotion::Anxiety, Intensity::new(0.4));
            vector.raise_to(Emotion::Fear, Intensity::new(0.3));
        }
        vector.set_arousal(arousal);

        Ok(
            ModalityReading::new(Modality::Audio, vector, source).with_raw(RawSubFeatures {
                acoustic: Some(features),
                ..Default::default()
            }),
        )
    }

    /// Coarse visual heuristic. Dark desaturated frames read as sadness and
    /// emptiness, harsh contrast as agitation and anger.
    fn normalize_image(
        &self,
        features: Option<VisualFeatures>,
    ) -> Result<ModalityReading, NormalizeError> {
        let features = features.ok_or_else(|| NormalizeError::InvalidModalityData {
            modality: Modality::Image,
            reason: "visual features missing".into(),
        })?;
        let h = &self.config.image;
        let source = EstimationSource::RuleFallback;
        let mut vector = EmotionVector::neutral(source.confidence());
        let mut arousal = Intensity::ZERO;

        if features.brightness < h.dark_brightness && features.saturation < h.low_saturation {
            vector.raise_to(Emotion::Sadness, Intensity::new(0.5));
            vector.raise_to(Emotion::Emptiness, Intensity::new(0.4));
            vector.raise_to(Emotion::Hopelessness, Intensity::new(0.3));
            arousal = arousal.max_of(Intensity::new(0.2));
        }
        if features.contrast > h.high_contrast {
            vector.raise_to(Emotion::Agitation, Intensity::new(0.5));
            vector.raise_to(Emotion::Anger, Intensity::new(0.4));
            arousal = arousal.max_of(Intensity::new(0.6));
        }
        vector.set_arousal(arousal);

        Ok(
            ModalityReading::new(Modality::Image, vector, source).with_raw(RawSubFeatures {
                visual: Some(features),
                ..Default::default()
            }),
        )
    }
}
