//! User directory contract and in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::value_objects::profile::ProfileUpdate;
use crate::errors::DirectoryError;

use wavely_shared::DirectoryConfig;

/// Fields persisted when a user record is first created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserRecord {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub username: Option<String>,
}

/// Contract for the remote user-profile directory
///
/// The directory stores the app-side profile keyed by provider uid. It is a
/// side-effect target during reconciliation; the local session never blocks
/// on it.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether a record exists for a provider uid
    async fn exists(&self, uid: &str) -> Result<bool, DirectoryError>;

    /// Create a new user record
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Record created
    /// * `Err(DirectoryError::Duplicate)` - A record for this uid already exists
    async fn create(&self, record: NewUserRecord) -> Result<(), DirectoryError>;

    /// Stamp the record's last-login timestamp with now
    async fn touch_last_login(&self, uid: &str) -> Result<(), DirectoryError>;

    /// Apply a partial profile update to an existing record
    async fn update(&self, uid: &str, update: ProfileUpdate) -> Result<(), DirectoryError>;

    /// Resolve a username to the email it was registered with
    async fn find_email_by_username(
        &self,
        username: &str,
    ) -> Result<Option<String>, DirectoryError>;

    /// Whether no record has claimed a username yet
    async fn is_username_available(&self, username: &str) -> Result<bool, DirectoryError>;
}

/// Stored form of a directory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub phone_number: Option<String>,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// In-memory user directory
///
/// Reference implementation of the directory contract, used in tests and
/// local demos.
#[derive(Clone)]
pub struct InMemoryUserDirectory {
    config: DirectoryConfig,
    records: Arc<RwLock<HashMap<String, DirectoryRecord>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::with_config(DirectoryConfig::default())
    }

    /// Create a directory bound to a specific backend configuration
    ///
    /// The config is resolved once at startup and injected here; real
    /// backend constructors take the same shape.
    pub fn with_config(config: DirectoryConfig) -> Self {
        Self {
            config,
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The backend configuration this directory was constructed with
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Fetch a stored record, for assertions in tests
    pub async fn record(&self, uid: &str) -> Option<DirectoryRecord> {
        self.records.read().await.get(uid).cloned()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, uid: &str) -> Result<bool, DirectoryError> {
        let records = self.records.read().await;
        Ok(records.contains_key(uid))
    }

    async fn create(&self, record: NewUserRecord) -> Result<(), DirectoryError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.uid) {
            return Err(DirectoryError::Duplicate {
                field: "uid".to_string(),
            });
        }
        if let Some(username) = &record.username {
            let taken = records
                .values()
                .any(|r| r.username.as_deref() == Some(username.as_str()));
            if taken {
                return Err(DirectoryError::Duplicate {
                    field: "username".to_string(),
                });
            }
        }

        records.insert(
            record.uid.clone(),
            DirectoryRecord {
                uid: record.uid,
                display_name: record.display_name,
                email: record.email,
                photo_url: record.photo_url,
                phone_number: None,
                username: record.username,
                created_at: Utc::now(),
                last_login_at: None,
            },
        );
        Ok(())
    }

    async fn touch_last_login(&self, uid: &str) -> Result<(), DirectoryError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(uid).ok_or(DirectoryError::NotFound)?;
        record.last_login_at = Some(Utc::now());
        Ok(())
    }

    async fn update(&self, uid: &str, update: ProfileUpdate) -> Result<(), DirectoryError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(uid).ok_or(DirectoryError::NotFound)?;
        if let Some(name) = update.display_name {
            record.display_name = Some(name);
        }
        if let Some(url) = update.photo_url {
            record.photo_url = Some(url);
        }
        if let Some(phone) = update.phone_number {
            record.phone_number = Some(phone);
        }
        Ok(())
    }

    async fn find_email_by_username(
        &self,
        username: &str,
    ) -> Result<Option<String>, DirectoryError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.username.as_deref() == Some(username))
            .and_then(|r| r.email.clone()))
    }

    async fn is_username_available(&self, username: &str) -> Result<bool, DirectoryError> {
        let records = self.records.read().await;
        Ok(!records
            .values()
            .any(|r| r.username.as_deref() == Some(username)))
    }
}
