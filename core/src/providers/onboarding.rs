//! Onboarding collaborator contracts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{DirectoryError, ProviderError};

/// Contract for profile image storage
#[async_trait]
pub trait ProfileAssetStore: Send + Sync {
    /// Upload a profile image and return its public URL
    async fn upload_profile_image(
        &self,
        uid: &str,
        image: &[u8],
    ) -> Result<String, ProviderError>;
}

/// Contract for persisting onboarding progress
#[async_trait]
pub trait OnboardingStore: Send + Sync {
    /// Save the interest tags a user selected
    async fn save_interests(&self, uid: &str, interests: &[String]) -> Result<(), DirectoryError>;

    /// Mark onboarding as finished for a user
    async fn mark_complete(&self, uid: &str) -> Result<(), DirectoryError>;
}

#[derive(Debug, Clone, Default)]
struct OnboardingRecord {
    interests: Vec<String>,
    complete: bool,
}

/// In-memory onboarding store for tests and demos
#[derive(Clone, Default)]
pub struct InMemoryOnboardingStore {
    records: Arc<RwLock<HashMap<String, OnboardingRecord>>>,
}

impl InMemoryOnboardingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn interests(&self, uid: &str) -> Vec<String> {
        self.records
            .read()
            .await
            .get(uid)
            .map(|r| r.interests.clone())
            .unwrap_or_default()
    }

    pub async fn is_complete(&self, uid: &str) -> bool {
        self.records
            .read()
            .await
            .get(uid)
            .map(|r| r.complete)
            .unwrap_or(false)
    }
}

#[async_trait]
impl OnboardingStore for InMemoryOnboardingStore {
    async fn save_interests(&self, uid: &str, interests: &[String]) -> Result<(), DirectoryError> {
        let mut records = self.records.write().await;
        records.entry(uid.to_string()).or_default().interests = interests.to_vec();
        Ok(())
    }

    async fn mark_complete(&self, uid: &str) -> Result<(), DirectoryError> {
        let mut records = self.records.write().await;
        records.entry(uid.to_string()).or_default().complete = true;
        Ok(())
    }
}
