//! Modality readings - per-channel emotion estimates entering fusion.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Intensity;

use super::vector::EmotionVector;

/// Input channel an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Text,
    Audio,
    Image,
}

impl Modality {
    pub fn name(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Audio => "audio",
            Modality::Image => "image",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a reading's vector was produced.
///
/// External model scores carry the model's own confidence; the rule
/// fallback path always reports a fixed, lower confidence so fusion can
/// discount it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimationSource {
    ExternalModel { confidence: Intensity },
    RuleFallback,
}

impl EstimationSource {
    /// Confidence attributed to the estimate.
    pub fn confidence(&self) -> Intensity {
        match self {
            EstimationSource::ExternalModel { confidence } => *confidence,
            EstimationSource::RuleFallback => Intensity::new(Self::FALLBACK_CONFIDENCE),
        }
    }

    /// Fixed confidence assigned to keyword and heuristic estimates.
    pub const FALLBACK_CONFIDENCE: f64 = 0.4;

    pub fn is_fallback(&self) -> bool {
        matches!(self, EstimationSource::RuleFallback)
    }
}

/// Low-level acoustic measurements extracted from an audio segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticFeatures {
    /// Mean fundamental frequency in Hz.
    pub pitch_mean: f64,
    /// Pitch standard deviation in Hz, a rough jitter proxy.
    pub pitch_std: f64,
    /// RMS energy, normalized to [0, 1] by the caller.
    pub energy: f64,
    /// Spectral centroid in Hz, a rough tempo/brightness proxy.
    pub spectral_centroid: f64,
}

/// Low-level visual measurements extracted from an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualFeatures {
    /// Mean luminance, 0-255.
    pub brightness: f64,
    /// Luminance standard deviation, 0-255.
    pub contrast: f64,
    /// Mean saturation, 0-255.
    pub saturation: f64,
}

/// Raw sub-features a caller may attach alongside a reading, kept for
/// the heuristic paths and for audit trails.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSubFeatures {
    /// Raw text for keyword estimation and crisis keyword scanning.
    pub text: Option<String>,
    pub acoustic: Option<AcousticFeatures>,
    pub visual: Option<VisualFeatures>,
}

/// One modality's estimate, ready for fusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalityReading {
    pub modality: Modality,
    pub vector: EmotionVector,
    pub source: EstimationSource,
    #[serde(default)]
    pub raw: RawSubFeatures,
}

impl ModalityReading {
    pub fn new(modality: Modality, vector: EmotionVector, source: EstimationSource) -> Self {
        Self {
            modality,
            vector,
            source,
            raw: RawSubFeatures::default(),
        }
    }

    pub fn with_raw(mut self, raw: RawSubFeatures) -> Self {
        self.raw = raw;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::Emotion;

    #[test]
    fn fallback_source_uses_fixed_confidence() {
        let source = EstimationSource::RuleFallback;
        assert!(source.is_fallback());
        assert_eq!(source.confidence().value(), 0.4);
    }

    #[test]
    fn external_model_source_keeps_reported_confidence() {
        let source = EstimationSource::ExternalModel {
            confidence: Intensity::new(0.92),
        };
        assert!(!source.is_fallback());
        assert_eq!(source.confidence().value(), 0.92);
    }

    #[test]
    fn reading_round_trips_through_json() {
        let mut vector = EmotionVector::neutral(Intensity::new(0.9));
        vector.set(Emotion::Anxiety, Intensity::new(0.6));
        let reading = ModalityReading::new(
            Modality::Audio,
            vector,
            EstimationSource::RuleFallback,
        )
        .with_raw(RawSubFeatures {
            acoustic: Some(AcousticFeatures {
                pitch_mean: 220.0,
                pitch_std: 40.0,
                energy: 0.7,
                spectral_centroid: 1800.0,
            }),
            ..Default::default()
        });
        let json = serde_json::to_string(&reading).unwrap();
        let back: ModalityReading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }
}
