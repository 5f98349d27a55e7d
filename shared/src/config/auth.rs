//! Authentication flow configuration

use serde::{Deserialize, Serialize};

/// Configuration for the authentication flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthFlowConfig {
    /// Seconds a user must wait before requesting another verification code
    pub resend_cooldown_secs: u32,

    /// Number of digits in an SMS verification code
    pub code_length: usize,

    /// Minimum password length accepted at sign-up
    pub min_password_length: usize,

    /// Whether new accounts may be created
    #[serde(default = "default_allow_registration")]
    pub allow_registration: bool,
}

impl Default for AuthFlowConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_secs: 60,
            code_length: 6,
            min_password_length: 8,
            allow_registration: default_allow_registration(),
        }
    }
}

impl AuthFlowConfig {
    /// Set the resend cooldown in seconds
    pub fn with_resend_cooldown_secs(mut self, secs: u32) -> Self {
        self.resend_cooldown_secs = secs;
        self
    }

    /// Set the minimum password length accepted at sign-up
    pub fn with_min_password_length(mut self, length: usize) -> Self {
        self.min_password_length = length;
        self
    }

    /// Disable registration of new accounts
    pub fn without_registration(mut self) -> Self {
        self.allow_registration = false;
        self
    }
}

fn default_allow_registration() -> bool {
    true
}
