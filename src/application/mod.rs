//! Application layer - use case handlers.

pub mod handlers;

pub use handlers::{
    AnalysisOutcome, AnalyzeInteractionCommand, AnalyzeInteractionError,
    AnalyzeInteractionHandler, GetProfileReportCommand, GetProfileReportError,
    GetProfileReportHandler,
};
