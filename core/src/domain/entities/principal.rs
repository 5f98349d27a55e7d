//! Principal record returned by an external identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity record produced by a provider after successful authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPrincipal {
    /// Stable identifier for the provider account
    pub uid: String,

    /// Email address, when the provider knows one
    pub email: Option<String>,

    /// Display name, when the provider knows one
    pub display_name: Option<String>,

    /// Phone number in E.164 format, for phone-authenticated accounts
    pub phone_number: Option<String>,

    /// Profile photo URL
    pub photo_url: Option<String>,

    /// Timestamp when the provider account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the account's most recent sign-in
    pub last_sign_in_at: DateTime<Utc>,
}

impl ProviderPrincipal {
    /// Creates a principal with only a uid, timestamps set to now
    pub fn new(uid: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            phone_number: None,
            photo_url: None,
            created_at: now,
            last_sign_in_at: now,
        }
    }

    /// Whether this sign-in created the provider account
    ///
    /// Providers report equal creation and last-sign-in timestamps for a
    /// first-time sign-in.
    pub fn is_first_sign_in(&self) -> bool {
        self.created_at == self.last_sign_in_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_principal_is_first_sign_in() {
        let principal = ProviderPrincipal::new("uid-1");
        assert!(principal.is_first_sign_in());
    }

    #[test]
    fn test_returning_principal_is_not_first_sign_in() {
        let mut principal = ProviderPrincipal::new("uid-1");
        principal.last_sign_in_at = principal.created_at + Duration::days(3);
        assert!(!principal.is_first_sign_in());
    }
}
