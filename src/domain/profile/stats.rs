//! Incremental statistics used by the profile aggregate.

use serde::{Deserialize, Serialize};

/// Exponential moving average. The first observation seeds the mean
/// directly so a new profile does not start biased toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmaMean {
    value: f64,
    seeded: bool,
}

impl EmaMean {
    pub fn update(&mut self, alpha: f64, observation: f64) {
        if self.seeded {
            self.value += alpha * (observation - self.value);
        } else {
            self.value = observation;
            self.seeded = true;
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Welford's online variance. Numerically stable over long update streams,
/// no history replay needed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WelfordStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl WelfordStats {
    pub fn update(&mut self, observation: f64) {
        self.count += 1;
        let delta = observation - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = observation - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance; 0.0 with fewer than two observations.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}
