//! Intensity value object (0.0-1.0 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bounded score between 0.0 and 1.0 inclusive.
///
/// Every emotion intensity, weight, confidence, and arousal value in the
/// engine is carried as an `Intensity`, so out-of-range floats cannot leak
/// past construction. `NaN` is treated as the conservative maximum because
/// under-reporting intensity is the unsafe direction for crisis routing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intensity(f64);

impl Intensity {
    /// Zero intensity.
    pub const ZERO: Self = Self(0.0);

    /// Maximum intensity.
    pub const MAX: Self = Self(1.0);

    /// Creates a new Intensity, clamping to the valid range.
    ///
    /// `NaN` clamps to 1.0 rather than 0.0: malformed input degrades toward
    /// a higher risk estimate, never a lower one.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(1.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the larger of two intensities.
    pub fn max_of(&self, other: Intensity) -> Self {
        if other.0 > self.0 {
            other
        } else {
            *self
        }
    }

    /// True if at or above the given threshold.
    pub fn at_least(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
