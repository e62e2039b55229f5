//! Property tests for fusion invariants.

use proptest::prelude::*;

use mindgate::config::{FusionConfig, FusionMode};
use mindgate::domain::emotion::{
    Emotion, EmotionVector, EstimationSource, Modality, ModalityReading,
};
use mindgate::domain::foundation::Intensity;
use mindgate::domain::fusion::ModalityFuser;

fn reading_strategy(modality: Modality) -> impl Strategy<Value = ModalityReading> {
    (
        proptest::collection::vec(0.0f64..=1.0, 12),
        0.0f64..=1.0,
        0.0f64..=1.0,
    )
        .prop_map(move |(values, arousal, confidence)| {
            let confidence = Intensity::new(confidence);
            let mut vector = EmotionVector::neutral(confidence);
            for (emotion, value) in Emotion::ALL.iter().zip(values.iter()) {
                vector.set(*emotion, Intensity::new(*value));
            }
            vector.set_arousal(Intensity::new(arousal));
            ModalityReading::new(
                modality,
                vector,
                EstimationSource::ExternalModel { confidence },
            )
        })
}

fn readings_strategy() -> impl Strategy<Value = Vec<ModalityReading>> {
    (
        proptest::option::of(reading_strategy(Modality::Text)),
        proptest::option::of(reading_strategy(Modality::Audio)),
        proptest::option::of(reading_strategy(Modality::Image)),
    )
        .prop_map(|(text, audio, image)| {
            [text, audio, image].into_iter().flatten().collect::<Vec<_>>()
        })
        .prop_filter("at least one modality", |readings| !readings.is_empty())
}

fn mode_strategy() -> impl Strategy<Value = FusionMode> {
    prop_oneof![Just(FusionMode::Fixed), Just(FusionMode::Adaptive)]
}

proptest! {
    #[test]
    fn fused_values_stay_in_unit_range(readings in readings_strategy(), mode in mode_strategy()) {
        let fuser = ModalityFuser::new(FusionConfig { mode, ..FusionConfig::default() });
        let fused = fuser.fuse(&readings).unwrap();
        for (_, intensity) in fused.vector.iter() {
            prop_assert!((0.0..=1.0).contains(&intensity.value()));
        }
        prop_assert!((0.0..=1.0).contains(&fused.vector.arousal().value()));
        prop_assert!((0.0..=1.0).contains(&fused.vector.confidence().value()));
    }

    #[test]
    fn weights_sum_to_one(readings in readings_strategy(), mode in mode_strategy()) {
        let fuser = ModalityFuser::new(FusionConfig { mode, ..FusionConfig::default() });
        let fused = fuser.fuse(&readings).unwrap();
        let sum: f64 = fused.weights.iter().map(|(_, w)| w).sum();
        prop_assert!((sum - 1.0).abs() < 1e-6);
        prop_assert_eq!(fused.weights.len(), readings.len());
    }

    #[test]
    fn single_reading_is_identity(reading in reading_strategy(Modality::Text), mode in mode_strategy()) {
        let fuser = ModalityFuser::new(FusionConfig { mode, ..FusionConfig::default() });
        let fused = fuser.fuse(std::slice::from_ref(&reading)).unwrap();
        prop_assert_eq!(fused.weights.clone(), vec![(Modality::Text, 1.0)]);
        for (emotion, intensity) in reading.vector.iter() {
            prop_assert!((fused.vector.get(emotion).value() - intensity.value()).abs() < 1e-12);
        }
    }

    #[test]
    fn dominant_emotion_is_an_argmax(readings in readings_strategy()) {
        let fuser = ModalityFuser::new(FusionConfig::default());
        let fused = fuser.fuse(&readings).unwrap();
        let dominant = fused.vector.get(fused.dominant_emotion).value();
        for (_, intensity) in fused.vector.iter() {
            prop_assert!(intensity.value() <= dominant + 1e-12);
        }
    }
}
