//! Risk module - urgency scoring, crisis overrides, and tier routing.

mod assessor;
mod router;

pub use assessor::{RiskAssessment, RiskAssessor, RiskLevel};
pub use router::{IntelligentRouter, RoutingDecision, RoutingLevel};
