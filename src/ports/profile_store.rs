//! ProfileStore port for longitudinal profile persistence

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::fusion::FusedAssessment;
use crate::domain::profile::{ProfileReport, UserProfile};
use crate::domain::risk::{RiskLevel, RoutingLevel};

/// Errors from profile store adapters
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("profile serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("profile storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Store for per-user longitudinal profiles
///
/// Implementations own the profiles and serialize all mutation per user:
/// concurrent updates for the same user are applied one at a time, while
/// different users never block each other. `get` never fails on absence;
/// an unseen user id yields a fresh zeroed profile.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Current profile snapshot (fresh zeroed profile for unseen users)
    async fn get(&self, user_id: &UserId) -> Result<UserProfile, ProfileStoreError>;

    /// Fold one completed interaction into the profile and return the
    /// post-update state. Intentionally not idempotent.
    async fn update(
        &self,
        user_id: &UserId,
        fused: &FusedAssessment,
        risk_level: RiskLevel,
        routing_level: RoutingLevel,
    ) -> Result<UserProfile, ProfileStoreError>;

    /// Derived analytics for the user's current profile
    async fn report(&self, user_id: &UserId) -> Result<ProfileReport, ProfileStoreError>;
}
