//! Phone verification flow state.

use serde::{Deserialize, Serialize};

/// Opaque correlation token handed back by the OTP provider
///
/// Present iff the flow is awaiting verification; cleared on every other
/// transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationId(pub String);

impl VerificationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// State of the phone OTP send/verify lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PhoneAuthState {
    /// No phone verification in progress
    Idle,
    /// A code request is in flight
    SendingCode,
    /// A code was sent; waiting for the user to enter it
    AwaitingVerification { phone_number: String },
    /// The code was accepted
    Verified,
    /// The last send or verify attempt failed
    Error { message: String },
}

impl PhoneAuthState {
    pub fn is_awaiting_verification(&self) -> bool {
        matches!(self, PhoneAuthState::AwaitingVerification { .. })
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, PhoneAuthState::Verified)
    }
}
