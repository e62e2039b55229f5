//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the Mindgate domain.

mod errors;
mod ids;
mod intensity;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{AssessmentId, UserId};
pub use intensity::Intensity;
pub use timestamp::Timestamp;
