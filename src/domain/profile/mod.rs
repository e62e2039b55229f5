//! Profile module - longitudinal per-user state and derived reports.

mod profile;
mod report;
mod stats;

pub use profile::{HistoryEntry, Personality, UserProfile};
pub use report::{Cycles, ProfileReport, Trend, TrendDirection};
pub use stats::{EmaMean, WelfordStats};
