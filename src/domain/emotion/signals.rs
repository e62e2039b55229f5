//! Risk signals - named scalar indicators carried alongside emotions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::Intensity;

/// Named risk indicator derived during fusion or supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalName {
    SelfHarmRisk,
    HopelessnessSignal,
    DissociationLevel,
}

impl SignalName {
    pub fn name(&self) -> &'static str {
        match self {
            SignalName::SelfHarmRisk => "self_harm_risk",
            SignalName::HopelessnessSignal => "hopelessness_signal",
            SignalName::DissociationLevel => "dissociation_level",
        }
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sparse map of risk signals. Absent means not observed, not zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskSignals(BTreeMap<SignalName, Intensity>);

impl RiskSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: SignalName) -> Option<Intensity> {
        self.0.get(&name).copied()
    }

    pub fn set(&mut self, name: SignalName, value: Intensity) {
        self.0.insert(name, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignalName, Intensity)> + '_ {
        self.0.iter().map(|(n, v)| (*n, *v))
    }
}
