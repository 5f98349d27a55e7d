//! OTP provider contract.

use async_trait::async_trait;

use crate::domain::entities::principal::ProviderPrincipal;
use crate::domain::value_objects::phone_auth::VerificationId;
use crate::errors::ProviderError;

/// Contract for the SMS one-time-passcode provider
///
/// The provider owns code generation, dispatch, and validation. The core
/// only sequences the send/confirm protocol and tracks the correlation
/// token between the two calls.
#[async_trait]
pub trait OtpProvider: Send + Sync {
    /// Request a verification code for a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - Destination number in E.164 format
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationId)` - Correlation token for the pending code
    /// * `Err(ProviderError)` - Dispatch failed
    async fn request_code(&self, phone_number: &str) -> Result<VerificationId, ProviderError>;

    /// Confirm a verification code previously sent
    ///
    /// # Arguments
    ///
    /// * `verification_id` - Token returned by `request_code`
    /// * `code` - The digits the user entered
    async fn confirm_code(
        &self,
        verification_id: &VerificationId,
        code: &str,
    ) -> Result<ProviderPrincipal, ProviderError>;
}
