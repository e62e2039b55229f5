//! Use case handlers, one per operation.

mod analyze_interaction;
mod get_profile_report;

pub use analyze_interaction::{
    AnalysisOutcome, AnalyzeInteractionCommand, AnalyzeInteractionError,
    AnalyzeInteractionHandler,
};
pub use get_profile_report::{
    GetProfileReportCommand, GetProfileReportError, GetProfileReportHandler,
};
