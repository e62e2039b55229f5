//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Unknown emotion name: '{name}'")]
    UnknownEmotion { name: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an unknown emotion validation error.
    pub fn unknown_emotion(name: impl Into<String>) -> Self {
        ValidationError::UnknownEmotion { name: name.into() }
    }
}
