//! Filesystem profile store - one JSON file per user.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};

use crate::config::ProfileConfig;
use crate::domain::foundation::UserId;
use crate::domain::fusion::FusedAssessment;
use crate::domain::profile::{ProfileReport, UserProfile};
use crate::domain::risk::{RiskLevel, RoutingLevel};
use crate::ports::{ProfileStore, ProfileStoreError};

/// Filesystem-based profile store
///
/// Stores profile JSON files in a configurable base directory:
/// {base_dir}/profiles/{user_id}.json. Writes go through a temporary file
/// and a rename, so a crash mid-write never leaves a torn profile. A
/// per-user lock map serializes read-modify-write cycles for the same user
/// without blocking others.
pub struct FsProfileStore {
    base_dir: PathBuf,
    config: ProfileConfig,
    locks: RwLock<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl FsProfileStore {
    /// Create new filesystem store with base directory
    pub fn new(base_dir: impl AsRef<Path>, config: ProfileConfig) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            config,
            locks: RwLock::new(HashMap::new()),
        }
    }

    fn file_path(&self, user_id: &UserId) -> PathBuf {
        self.base_dir
            .join("profiles")
            .join(format!("{}.json", user_id.as_str()))
    }

    async fn user_lock(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        if let Some(existing) = self.locks.read().await.get(user_id) {
            return Arc::clone(existing);
        }
        let mut locks = self.locks.write().await;
        Arc::clone(locks.entry(user_id.clone()).or_default())
    }

    async fn load(&self, user_id: &UserId) -> Result<UserProfile, ProfileStoreError> {
        let path = self.file_path(user_id);
        match fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(UserProfile::new(user_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(
        &self,
        user_id: &UserId,
        profile: &UserProfile,
    ) -> Result<(), ProfileStoreError> {
        let path = self.file_path(user_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(profile)?;

        // Atomic on the same filesystem: write aside, then rename over.
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &bytes).await?;
        fs::rename(&temp_path, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for FsProfileStore {
    async fn get(&self, user_id: &UserId) -> Result<UserProfile, ProfileStoreError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;
        self.load(user_id).await
    }

    async fn update(
        &self,
        user_id: &UserId,
        fused: &FusedAssessment,
        risk_level: RiskLevel,
        routing_level: RoutingLevel,
    ) -> Result<UserProfile, ProfileStoreError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load(user_id).await?;
        profile.apply_interaction(fused, risk_level, routing_level, &self.config);
        self.persist(user_id, &profile).await?;
        Ok(profile)
    }

    async fn report(&self, user_id: &UserId) -> Result<ProfileReport, ProfileStoreError> {
        let profile = self.get(user_id).await?;
        Ok(ProfileReport::from_profile(&profile))
    }
}
