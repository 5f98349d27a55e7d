//! Session entity representing the signed-in principal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::principal::ProviderPrincipal;
use crate::domain::value_objects::profile::ProfileUpdate;

/// Local, authoritative representation of who is signed in right now
///
/// At most one session is live per process. It is owned by the auth service
/// and handed to observers as an immutable snapshot; it is replaced wholesale
/// on every provider state change and destroyed on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Local-only identity for this session instance
    pub id: Uuid,

    /// Stable identifier of the provider account backing this session
    pub provider_uid: String,

    /// Email address, when known
    pub email: Option<String>,

    /// Display name, when known
    pub display_name: Option<String>,

    /// Username, chosen at sign-up or derived from the display name
    pub username: Option<String>,

    /// Phone number in E.164 format
    pub phone_number: Option<String>,

    /// Profile photo URL
    pub photo_url: Option<String>,
}

impl Session {
    /// Builds a session snapshot from a provider principal
    pub fn from_principal(principal: &ProviderPrincipal, username: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_uid: principal.uid.clone(),
            email: principal.email.clone(),
            display_name: principal.display_name.clone(),
            username,
            phone_number: principal.phone_number.clone(),
            photo_url: principal.photo_url.clone(),
        }
    }

    /// Merges a partial profile update into this snapshot
    ///
    /// Fields absent from the update keep their prior values, so successive
    /// partial updates compose.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.display_name {
            self.display_name = Some(name.clone());
        }
        if let Some(url) = &update.photo_url {
            self.photo_url = Some(url.clone());
        }
        if let Some(phone) = &update.phone_number {
            self.phone_number = Some(phone.clone());
        }
    }
}
