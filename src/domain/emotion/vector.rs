//! EmotionVector - the common bounded representation every modality maps into.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{Intensity, ValidationError};

use super::taxonomy::{Emotion, CRISIS_PRIORITY};

/// Intensities for all twelve emotions plus arousal and confidence.
///
/// The twelve keys are always present (fixed-size storage indexed by
/// [`Emotion`]); there is no way to construct a vector with a missing or
/// unknown emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionVector {
    intensities: [Intensity; 12],
    arousal: Intensity,
    confidence: Intensity,
}

impl EmotionVector {
    /// All-zero vector with the given confidence.
    pub fn neutral(confidence: Intensity) -> Self {
        Self {
            intensities: [Intensity::ZERO; 12],
            arousal: Intensity::ZERO,
            confidence,
        }
    }

    /// Builds a vector from an external score map.
    ///
    /// Missing emotions zero-fill; out-of-range scores clamp; unknown
    /// emotion names are rejected. Arousal defaults to the maximum
    /// intensity present, matching how the upstream classifiers report it.
    pub fn from_score_map(
        scores: &HashMap<String, f64>,
        confidence: Intensity,
    ) -> Result<Self, ValidationError> {
        let mut vector = Self::neutral(confidence);
        for (name, score) in scores {
            let emotion: Emotion = name.parse()?;
            vector.set(emotion, Intensity::new(*score));
        }
        vector.arousal = vector.peak_intensity();
        Ok(vector)
    }

    /// Returns the intensity for an emotion.
    pub fn get(&self, emotion: Emotion) -> Intensity {
        self.intensities[emotion.index()]
    }

    /// Sets the intensity for an emotion.
    pub fn set(&mut self, emotion: Emotion, intensity: Intensity) {
        self.intensities[emotion.index()] = intensity;
    }

    /// Raises an emotion to at least the given intensity, never lowering it.
    pub fn raise_to(&mut self, emotion: Emotion, floor: Intensity) {
        let current = self.get(emotion);
        self.set(emotion, current.max_of(floor));
    }

    /// Arousal scalar.
    pub fn arousal(&self) -> Intensity {
        self.arousal
    }

    /// Sets the arousal scalar.
    pub fn set_arousal(&mut self, arousal: Intensity) {
        self.arousal = arousal;
    }

    /// Estimation confidence.
    pub fn confidence(&self) -> Intensity {
        self.confidence
    }

    /// Sets the estimation confidence.
    pub fn set_confidence(&mut self, confidence: Intensity) {
        self.confidence = confidence;
    }

    /// Iterates over (emotion, intensity) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, Intensity)> + '_ {
        Emotion::ALL.iter().map(move |e| (*e, self.get(*e)))
    }

    /// Highest intensity across all emotions.
    pub fn peak_intensity(&self) -> Intensity {
        self.intensities
            .iter()
            .copied()
            .fold(Intensity::ZERO, |acc, i| acc.max_of(i))
    }

    /// The strongest emotion, ties broken by crisis priority.
    ///
    /// An all-zero vector still resolves deterministically (to the highest
    /// priority emotion) so downstream code never sees an absent dominant.
    pub fn dominant_emotion(&self) -> Emotion {
        let mut best = CRISIS_PRIORITY[0];
        let mut best_value = self.get(best).value();
        for e in CRISIS_PRIORITY {
            let v = self.get(e).value();
            if v > best_value {
                best = e;
                best_value = v;
            }
        }
        best
    }

    /// Count of emotions at or above the threshold.
    pub fn count_at_least(&self, threshold: f64) -> usize {
        self.iter().filter(|(_, i)| i.at_least(threshold)).count()
    }

    /// True when every intensity is below the threshold.
    pub fn is_below(&self, threshold: f64) -> bool {
        self.intensities.iter().all(|i| i.value() < threshold)
    }
}

impl Default for EmotionVector {
    fn default() -> Self {
        Self::neutral(Intensity::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn from_score_map_zero_fills_missing_emotions() {
        let scores = map(&[("sadness", 0.6)]);
        let v = EmotionVector::from_score_map(&scores, Intensity::new(0.9)).unwrap();
        assert_eq!(v.get(Emotion::Sadness).value(), 0.6);
        assert_eq!(v.get(Emotion::Anger).value(), 0.0);
        assert_eq!(v.confidence().value(), 0.9);
    }

    #[test]
    fn from_score_map_clamps_out_of_range() {
        let scores = map(&[("anxiety", 1.8), ("fear", -0.5)]);
        let v = EmotionVector::from_score_map(&scores, Intensity::MAX).unwrap();
        assert_eq!(v.get(Emotion::Anxiety).value(), 1.0);
        assert_eq!(v.get(Emotion::Fear).value(), 0.0);
    }

    #[test]
    fn from_score_map_rejects_unknown_emotion() {
        let scores = map(&[("joy", 0.9)]);
        assert!(EmotionVector::from_score_map(&scores, Intensity::MAX).is_err());
    }

    #[test]
    fn from_score_map_derives_arousal_from_peak() {
        let scores = map(&[("sadness", 0.3), ("agitation", 0.7)]);
        let v = EmotionVector::from_score_map(&scores, Intensity::MAX).unwrap();
        assert_eq!(v.arousal().value(), 0.7);
    }

    #[test]
    fn dominant_emotion_is_argmax() {
        let mut v = EmotionVector::default();
        v.set(Emotion::Sadness, Intensity::new(0.4));
        v.set(Emotion::Anxiety, Intensity::new(0.8));
        assert_eq!(v.dominant_emotion(), Emotion::Anxiety);
    }

    #[test]
    fn dominant_emotion_tie_breaks_by_crisis_priority() {
        let mut v = EmotionVector::default();
        v.set(Emotion::Loneliness, Intensity::new(0.5));
        v.set(Emotion::Hopelessness, Intensity::new(0.5));
        assert_eq!(v.dominant_emotion(), Emotion::Hopelessness);

        v.set(Emotion::SelfHarmImpulse, Intensity::new(0.5));
        assert_eq!(v.dominant_emotion(), Emotion::SelfHarmImpulse);
    }

    #[test]
    fn dominant_emotion_of_zero_vector_is_deterministic() {
        let v = EmotionVector::default();
        assert_eq!(v.dominant_emotion(), Emotion::SelfHarmImpulse);
    }

    #[test]
    fn raise_to_never_lowers() {
        let mut v = EmotionVector::default();
        v.set(Emotion::Sadness, Intensity::new(0.7));
        v.raise_to(Emotion::Sadness, Intensity::new(0.4));
        assert_eq!(v.get(Emotion::Sadness).value(), 0.7);
        v.raise_to(Emotion::Sadness, Intensity::new(0.9));
        assert_eq!(v.get(Emotion::Sadness).value(), 0.9);
    }

    #[test]
    fn count_at_least_counts_inclusively() {
        let mut v = EmotionVector::default();
        v.set(Emotion::Sadness, Intensity::new(0.5));
        v.set(Emotion::Anxiety, Intensity::new(0.5));
        v.set(Emotion::Fear, Intensity::new(0.49));
        assert_eq!(v.count_at_least(0.5), 2);
    }

    #[test]
    fn vector_serializes_and_round_trips() {
        let mut v = EmotionVector::neutral(Intensity::new(0.8));
        v.set(Emotion::Guilt, Intensity::new(0.33));
        v.set_arousal(Intensity::new(0.5));
        let json = serde_json::to_string(&v).unwrap();
        let back: EmotionVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
