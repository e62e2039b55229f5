//! The closed twelve-emotion taxonomy.
//!
//! The set mirrors the DBT-oriented emotion vocabulary the engine classifies
//! against. It is deliberately closed: every vector carries all twelve keys,
//! and score maps naming anything else are rejected at construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the twelve tracked emotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Emptiness,
    Shame,
    Agitation,
    SelfHarmImpulse,
    Anger,
    Sadness,
    Anxiety,
    Fear,
    Disgust,
    Guilt,
    Loneliness,
    Hopelessness,
}

/// Fixed tie-break order for dominant-emotion resolution, most
/// crisis-relevant first. Ties in an argmax resolve toward the earlier
/// entry so ambiguity always escalates, never hides.
pub const CRISIS_PRIORITY: [Emotion; 12] = [
    Emotion::SelfHarmImpulse,
    Emotion::Hopelessness,
    Emotion::Agitation,
    Emotion::Emptiness,
    Emotion::Shame,
    Emotion::Sadness,
    Emotion::Anxiety,
    Emotion::Fear,
    Emotion::Anger,
    Emotion::Disgust,
    Emotion::Guilt,
    Emotion::Loneliness,
];

impl Emotion {
    /// All twelve emotions in declaration order.
    pub const ALL: [Emotion; 12] = [
        Emotion::Emptiness,
        Emotion::Shame,
        Emotion::Agitation,
        Emotion::SelfHarmImpulse,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Anxiety,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Guilt,
        Emotion::Loneliness,
        Emotion::Hopelessness,
    ];

    /// Stable array index for vector storage.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|e| e == self).unwrap_or(0)
    }

    /// Snake-case wire name, matching external score map keys.
    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Emptiness => "emptiness",
            Emotion::Shame => "shame",
            Emotion::Agitation => "agitation",
            Emotion::SelfHarmImpulse => "self_harm_impulse",
            Emotion::Anger => "anger",
            Emotion::Sadness => "sadness",
            Emotion::Anxiety => "anxiety",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Guilt => "guilt",
            Emotion::Loneliness => "loneliness",
            Emotion::Hopelessness => "hopelessness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Emotion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .iter()
            .find(|e| e.name() == s)
            .copied()
            .ok_or_else(|| ValidationError::unknown_emotion(s))
    }
}
