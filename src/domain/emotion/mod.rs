//! Emotion module - the fixed taxonomy and its carrier types.

mod modality;
mod signals;
mod taxonomy;
mod vector;

pub use modality::{
    AcousticFeatures, EstimationSource, Modality, ModalityReading, RawSubFeatures, VisualFeatures,
};
pub use signals::{RiskSignals, SignalName};
pub use taxonomy::{Emotion, CRISIS_PRIORITY};
pub use vector::EmotionVector;
