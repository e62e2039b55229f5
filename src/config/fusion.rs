//! Fusion and normalization configuration

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::domain::emotion::{Emotion, Modality};

use super::error::ValidationError;

static DEFAULT_KEYWORD_RULES: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    // The table ships inside the crate, so a parse failure is a build defect
    // and must fail loudly rather than silently empty the fallback rules.
    serde_yaml::from_str(include_str!("defaults/keyword_rules.yaml"))
        .expect("embedded keyword_rules.yaml must parse")
});

/// How per-modality weights are chosen during fusion
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FusionMode {
    /// Configured base weights, renormalized over present modalities
    Fixed,
    /// Base weights scaled by each reading's confidence, then renormalized
    #[default]
    Adaptive,
}

/// One keyword-fallback rule: any matching term raises the emotion to at
/// least the given intensity
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct KeywordRule {
    pub emotion: Emotion,
    pub intensity: f64,
    pub terms: Vec<String>,
}

/// Coarse acoustic heuristic thresholds
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct AudioHeuristics {
    /// Pitch std (Hz) above which speech counts as high-variance
    #[serde(default = "default_high_pitch_std")]
    pub high_pitch_std: f64,

    /// Energy above which speech counts as energetic
    #[serde(default = "default_high_energy")]
    pub high_energy: f64,

    /// Energy below which speech counts as flat
    #[serde(default = "default_low_energy")]
    pub low_energy: f64,

    /// Pitch mean (Hz) below which speech counts as low
    #[serde(default = "default_low_pitch_mean")]
    pub low_pitch_mean: f64,

    /// Spectral centroid (Hz) above which speech counts as tense
    #[serde(default = "default_bright_centroid")]
    pub bright_centroid: f64,
}

/// Coarse visual heuristic thresholds (0-255 scale)
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ImageHeuristics {
    #[serde(default = "default_dark_brightness")]
    pub dark_brightness: f64,

    #[serde(default = "default_low_saturation")]
    pub low_saturation: f64,

    #[serde(default = "default_high_contrast")]
    pub high_contrast: f64,
}

/// Fusion configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FusionConfig {
    #[serde(default)]
    pub mode: FusionMode,

    /// Base weight for the text modality
    #[serde(default = "default_text_weight")]
    pub text_weight: f64,

    /// Base weight for the audio modality
    #[serde(default = "default_audio_weight")]
    pub audio_weight: f64,

    /// Base weight for the image modality
    #[serde(default = "default_image_weight")]
    pub image_weight: f64,

    /// External text scores below this confidence fall back to keywords
    #[serde(default = "default_min_model_confidence")]
    pub min_model_confidence: f64,

    /// Keyword-fallback table for text
    #[serde(default = "default_keyword_rules")]
    pub keyword_rules: Vec<KeywordRule>,

    #[serde(default)]
    pub audio: AudioHeuristics,

    #[serde(default)]
    pub image: ImageHeuristics,
}

impl FusionConfig {
    /// Base weight for a modality
    pub fn base_weight(&self, modality: Modality) -> f64 {
        match modality {
            Modality::Text => self.text_weight,
            Modality::Audio => self.audio_weight,
            Modality::Image => self.image_weight,
        }
    }

    /// Validate fusion configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let sum = self.text_weight + self.audio_weight + self.image_weight;
        if sum <= 0.0 {
            return Err(ValidationError::ZeroWeightSum("fusion.base_weights"));
        }
        if !(0.0..=1.0).contains(&self.min_model_confidence) {
            return Err(ValidationError::OutOfUnitRange("fusion.min_model_confidence"));
        }
        if self.keyword_rules.is_empty() {
            return Err(ValidationError::EmptyKeywordTable("fusion.keyword_rules"));
        }
        Ok(())
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            mode: FusionMode::default(),
            text_weight: default_text_weight(),
            audio_weight: default_audio_weight(),
            image_weight: default_image_weight(),
            min_model_confidence: default_min_model_confidence(),
            keyword_rules: default_keyword_rules(),
            audio: AudioHeuristics::default(),
            image: ImageHeuristics::default(),
        }
    }
}

impl Default for AudioHeuristics {
    fn default() -> Self {
        Self {
            high_pitch_std: default_high_pitch_std(),
            high_energy: default_high_energy(),
            low_energy: default_low_energy(),
            low_pitch_mean: default_low_pitch_mean(),
            bright_centroid: default_bright_centroid(),
        }
    }
}

impl Default for ImageHeuristics {
    fn default() -> Self {
        Self {
            dark_brightness: default_dark_brightness(),
            low_saturation: default_low_saturation(),
            high_contrast: default_high_contrast(),
        }
    }
}

fn default_text_weight() -> f64 {
    0.6
}

fn default_audio_weight() -> f64 {
    0.25
}

fn default_image_weight() -> f64 {
    0.15
}

fn default_min_model_confidence() -> f64 {
    0.3
}

fn default_keyword_rules() -> Vec<KeywordRule> {
    DEFAULT_KEYWORD_RULES.clone()
}

fn default_high_pitch_std() -> f64 {
    30.0
}

fn default_high_energy() -> f64 {
    0.6
}

fn default_low_energy() -> f64 {
    0.3
}

fn default_low_pitch_mean() -> f64 {
    150.0
}

fn default_bright_centroid() -> f64 {
    2500.0
}

fn default_dark_brightness() -> f64 {
    100.0
}

fn default_low_saturation() -> f64 {
    80.0
}

fn default_high_contrast() -> f64 {
    80.0
}
