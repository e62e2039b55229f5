//! In-memory profile store for embedding and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::config::ProfileConfig;
use crate::domain::foundation::UserId;
use crate::domain::fusion::FusedAssessment;
use crate::domain::profile::{ProfileReport, UserProfile};
use crate::domain::risk::{RiskLevel, RoutingLevel};
use crate::ports::{ProfileStore, ProfileStoreError};

/// In-memory profile store
///
/// Profiles live behind per-user mutexes inside a shared index, so two
/// updates for the same user serialize while different users proceed in
/// parallel. The index itself is only write-locked long enough to insert
/// a new entry.
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, Arc<Mutex<UserProfile>>>>,
    config: ProfileConfig,
}

impl InMemoryProfileStore {
    pub fn new(config: ProfileConfig) -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            config,
        }
    }

    async fn entry(&self, user_id: &UserId) -> Arc<Mutex<UserProfile>> {
        if let Some(existing) = self.profiles.read().await.get(user_id) {
            return Arc::clone(existing);
        }
        let mut profiles = self.profiles.write().await;
        Arc::clone(
            profiles
                .entry(user_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(UserProfile::new(user_id.clone())))),
        )
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: &UserId) -> Result<UserProfile, ProfileStoreError> {
        match self.profiles.read().await.get(user_id) {
            Some(entry) => Ok(entry.lock().await.clone()),
            None => Ok(UserProfile::new(user_id.clone())),
        }
    }

    async fn update(
        &self,
        user_id: &UserId,
        fused: &FusedAssessment,
        risk_level: RiskLevel,
        routing_level: RoutingLevel,
    ) -> Result<UserProfile, ProfileStoreError> {
        let entry = self.entry(user_id).await;
        let mut profile = entry.lock().await;
        profile.apply_interaction(fused, risk_level, routing_level, &self.config);
        Ok(profile.clone())
    }

    async fn report(&self, user_id: &UserId) -> Result<ProfileReport, ProfileStoreError> {
        let profile = self.get(user_id).await?;
        Ok(ProfileReport::from_profile(&profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::{Emotion, EmotionVector, Modality};
    use crate::domain::foundation::{AssessmentId, Intensity, Timestamp};

    fn fused(value: f64) -> FusedAssessment {
        let mut vector = EmotionVector::neutral(Intensity::MAX);
        vector.set(Emotion::Sadness, Intensity::new(value));
        FusedAssessment {
            id: AssessmentId::new(),
            dominant_emotion: vector.dominant_emotion(),
            vector,
            weights: vec![(Modality::Text, 1.0)],
            folded_from: None,
            created_at: Timestamp::now(),
        }
    }

    fn store() -> InMemoryProfileStore {
        InMemoryProfileStore::new(ProfileConfig::default())
    }

    #[tokio::test]
    async fn unseen_user_gets_fresh_profile() {
        let store = store();
        let user = UserId::new("new-user").unwrap();
        let profile = store.get(&user).await.unwrap();
        assert_eq!(profile.total_interactions, 0);
    }

    #[tokio::test]
    async fn update_persists_and_returns_new_state() {
        let store = store();
        let user = UserId::new("u1").unwrap();
        let updated = store
            .update(&user, &fused(0.5), RiskLevel::Low, RoutingLevel::Quick)
            .await
            .unwrap();
        assert_eq!(updated.total_interactions, 1);
        let fetched = store.get(&user).await.unwrap();
        assert_eq!(fetched.total_interactions, 1);
    }

    #[tokio::test]
    async fn concurrent_updates_for_one_user_all_land() {
        let store = Arc::new(store());
        let user = UserId::new("contended").unwrap();
        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = Arc::clone(&store);
            let user = user.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update(&user, &fused(0.4), RiskLevel::Low, RoutingLevel::Quick)
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        let profile = store.get(&user).await.unwrap();
        assert_eq!(profile.total_interactions, 20);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = store();
        let a = UserId::new("a").unwrap();
        let b = UserId::new("b").unwrap();
        store
            .update(&a, &fused(0.5), RiskLevel::Low, RoutingLevel::Quick)
            .await
            .unwrap();
        assert_eq!(store.get(&b).await.unwrap().total_interactions, 0);
    }

    #[tokio::test]
    async fn report_reflects_current_profile() {
        let store = store();
        let user = UserId::new("u1").unwrap();
        store
            .update(&user, &fused(0.6), RiskLevel::Critical, RoutingLevel::Crisis)
            .await
            .unwrap();
        let report = store.report(&user).await.unwrap();
        assert_eq!(report.crisis_count, 1);
        assert_eq!(report.risk_prediction_probability, 1.0);
    }
}
