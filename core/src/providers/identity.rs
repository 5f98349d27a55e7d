//! Identity provider contract.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::entities::principal::ProviderPrincipal;
use crate::errors::ProviderError;

/// Contract for the external identity provider (OAuth + email/password)
///
/// Implementations bridge the native provider SDK. All credential exchange,
/// token issuance, and credential storage happen on the provider's side; the
/// core only consumes the resulting principal.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the Google OAuth flow
    ///
    /// # Returns
    ///
    /// * `Ok(ProviderPrincipal)` - The authenticated principal
    /// * `Err(ProviderError::Cancelled)` - The user dismissed the flow
    /// * `Err(ProviderError)` - Any other provider failure
    async fn sign_in_with_google(&self) -> Result<ProviderPrincipal, ProviderError>;

    /// Sign in with an email address and password
    async fn sign_in_with_email_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderPrincipal, ProviderError>;

    /// Create a new provider account for an email address
    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderPrincipal, ProviderError>;

    /// Sign the current principal out of the provider
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// The currently signed-in principal, if any
    fn current_principal(&self) -> Option<ProviderPrincipal>;

    /// Subscribe to provider-side principal changes
    ///
    /// The provider publishes `Some(principal)` on every sign-in or profile
    /// refresh and `None` on provider-reported sign-out.
    fn principal_changes(&self) -> watch::Receiver<Option<ProviderPrincipal>>;
}
