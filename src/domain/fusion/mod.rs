//! Fusion module - per-modality normalization and weighted combination.

mod fuser;
mod normalizer;

pub use fuser::{FusedAssessment, FusionError, ModalityFuser};
pub use normalizer::{FeatureNormalizer, NormalizeError, RawModalityInput};
