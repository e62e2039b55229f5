//! GetProfileReportHandler - derived analytics for one user.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::UserId;
use crate::domain::profile::ProfileReport;
use crate::ports::{ProfileStore, ProfileStoreError};

/// Command to fetch a profile report
#[derive(Debug, Clone)]
pub struct GetProfileReportCommand {
    pub user_id: UserId,
}

/// Error type for report retrieval
#[derive(Debug, Error)]
pub enum GetProfileReportError {
    #[error(transparent)]
    Store(#[from] ProfileStoreError),
}

/// Handler for profile report retrieval
pub struct GetProfileReportHandler {
    store: Arc<dyn ProfileStore>,
}

impl GetProfileReportHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: GetProfileReportCommand,
    ) -> Result<ProfileReport, GetProfileReportError> {
        let report = self.store.report(&cmd.user_id).await?;
        debug!(
            user_id = %cmd.user_id,
            interactions = report.total_interactions,
            trend = ?report.trend.direction,
            "profile report generated"
        );
        Ok(report)
    }
}
