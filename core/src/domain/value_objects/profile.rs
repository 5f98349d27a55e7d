//! Partial profile update value type.

use serde::{Deserialize, Serialize};

/// Partial update applied to a user's profile
///
/// `None` fields are left untouched both in the user directory and in the
/// local session snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.photo_url.is_none() && self.phone_number.is_none()
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }
}
