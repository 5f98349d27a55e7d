//! Main authentication service implementation
//!
//! The single entry point the UI talks to. Owns the published state
//! (`session`, `is_authenticated`, `is_loading`, `last_error`,
//! `phone_auth_state`), serializes operations through the loading guard, and
//! maps every provider failure into the normalized error taxonomy before it
//! becomes observable.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::watch;

use crate::domain::entities::principal::ProviderPrincipal;
use crate::domain::entities::session::Session;
use crate::domain::value_objects::phone_auth::PhoneAuthState;
use crate::domain::value_objects::profile::ProfileUpdate;
use crate::errors::{AuthError, AuthResult};
use crate::providers::directory::UserDirectory;
use crate::providers::identity::IdentityProvider;
use crate::providers::otp::OtpProvider;
use crate::services::phone::PhoneAuthFlow;
use crate::services::session::SessionReconciler;

use wavely_shared::utils::identifier::is_valid_phone;
use wavely_shared::{classify_identifier, meets_password_policy, AuthFlowConfig, LoginType};

/// Everything a caller supplies to create an account
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone_number: Option<String>,
}

/// Authentication service orchestrating identity, OTP, and directory
/// collaborators
///
/// Constructed once at the application's composition root with its
/// collaborators injected; consumers receive it (or a handle to it) rather
/// than reaching for a global.
pub struct AuthService<I, O, D>
where
    I: IdentityProvider,
    O: OtpProvider,
    D: UserDirectory,
{
    /// External identity provider (OAuth, email/password)
    identity: Arc<I>,
    /// Remote user-profile directory
    directory: Arc<D>,
    /// Reconciles provider principals into the local session
    reconciler: SessionReconciler<D>,
    /// Phone OTP state machine
    phone_flow: PhoneAuthFlow<O>,
    /// Published state channels, one per observable field
    session_tx: watch::Sender<Option<Session>>,
    authenticated_tx: watch::Sender<bool>,
    loading_tx: watch::Sender<bool>,
    error_tx: watch::Sender<Option<AuthError>>,
    /// Service configuration
    config: AuthFlowConfig,
}

impl<I, O, D> AuthService<I, O, D>
where
    I: IdentityProvider,
    O: OtpProvider,
    D: UserDirectory,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `identity` - Identity provider for OAuth and email/password
    /// * `otp` - OTP provider for phone verification
    /// * `directory` - Remote user directory
    /// * `config` - Flow configuration (cooldowns, code length, policy)
    pub fn new(identity: Arc<I>, otp: Arc<O>, directory: Arc<D>, config: AuthFlowConfig) -> Self {
        let (session_tx, _) = watch::channel(None);
        let (authenticated_tx, _) = watch::channel(false);
        let (loading_tx, _) = watch::channel(false);
        let (error_tx, _) = watch::channel(None);

        Self {
            identity,
            directory: directory.clone(),
            reconciler: SessionReconciler::new(directory),
            phone_flow: PhoneAuthFlow::new(otp, config.resend_cooldown_secs, config.code_length),
            session_tx,
            authenticated_tx,
            loading_tx,
            error_tx,
            config,
        }
    }

    // --- published state -------------------------------------------------

    /// Current session snapshot
    pub fn session(&self) -> Option<Session> {
        self.session_tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated_tx.borrow()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading_tx.borrow()
    }

    pub fn last_error(&self) -> Option<AuthError> {
        self.error_tx.borrow().clone()
    }

    pub fn phone_auth_state(&self) -> PhoneAuthState {
        self.phone_flow.state()
    }

    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }

    pub fn subscribe_is_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated_tx.subscribe()
    }

    pub fn subscribe_is_loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    pub fn subscribe_last_error(&self) -> watch::Receiver<Option<AuthError>> {
        self.error_tx.subscribe()
    }

    pub fn subscribe_phone_auth_state(&self) -> watch::Receiver<PhoneAuthState> {
        self.phone_flow.subscribe_state()
    }

    /// Seconds remaining before a verification code may be resent
    pub fn subscribe_resend_cooldown(&self) -> watch::Receiver<u32> {
        self.phone_flow.subscribe_cooldown()
    }

    pub fn can_resend_code(&self) -> bool {
        self.phone_flow.can_resend()
    }

    // --- operations ------------------------------------------------------

    /// Sign in with a raw identifier (email, username, or phone) and password
    ///
    /// Non-email identifiers are resolved to an email through the directory
    /// before the provider is contacted.
    pub async fn sign_in_with_identifier_password(
        &self,
        identifier: &str,
        password: &str,
    ) -> AuthResult<()> {
        if !self.begin_operation() {
            return Ok(());
        }
        let result = self.identifier_password_sign_in(identifier, password).await;
        self.finish_operation(&result);
        result
    }

    /// Sign in through the Google OAuth flow
    ///
    /// User cancellation resolves quietly: no error is published and the
    /// session is left untouched.
    pub async fn sign_in_with_google(&self) -> AuthResult<()> {
        if !self.begin_operation() {
            return Ok(());
        }
        let result = self.google_sign_in().await;
        self.finish_operation(&result);
        result
    }

    /// Create an account with email and password
    ///
    /// Gated locally on the minimum password policy; a weak password never
    /// reaches the provider.
    pub async fn sign_up_with_email(&self, request: SignUpRequest) -> AuthResult<()> {
        if !self.begin_operation() {
            return Ok(());
        }
        let result = self.email_sign_up(request).await;
        self.finish_operation(&result);
        result
    }

    /// Request an SMS verification code
    pub async fn send_verification_code(&self, phone_number: &str) -> AuthResult<()> {
        if !self.begin_operation() {
            return Ok(());
        }
        let result = self.request_verification_code(phone_number).await;
        self.finish_operation(&result);
        result
    }

    /// Submit a verification code
    pub async fn verify_code(&self, code: &str) -> AuthResult<()> {
        if !self.begin_operation() {
            return Ok(());
        }
        let result = self.confirm_verification_code(code).await;
        self.finish_operation(&result);
        result
    }

    /// Feed code-entry keystrokes; dispatches verification on the keystroke
    /// that completes the six-digit buffer
    ///
    /// If another operation holds the loading guard when the buffer fills,
    /// the buffer is cleared so the user can re-enter the code.
    pub async fn append_code_digits(&self, input: &str) -> AuthResult<()> {
        let Some(code) = self.phone_flow.append_code_digits(input) else {
            return Ok(());
        };
        if !self.begin_operation() {
            self.phone_flow.clear_code_buffer();
            return Ok(());
        }
        let result = self.confirm_verification_code(&code).await;
        self.finish_operation(&result);
        result
    }

    /// Abandon the phone verification flow and return it to idle
    pub fn reset_phone_auth(&self) {
        self.phone_flow.reset();
    }

    /// Sign out of the provider and clear all local state
    ///
    /// Local state is cleared even when the provider call fails.
    pub async fn sign_out(&self) -> AuthResult<()> {
        if !self.begin_operation() {
            return Ok(());
        }
        let result = self
            .identity
            .sign_out()
            .await
            .map_err(AuthError::from);
        self.phone_flow.reset();
        self.publish_session(None);
        self.finish_operation(&result);
        result
    }

    /// Apply a partial profile update to the directory and the local session
    ///
    /// A no-op when nobody is signed in. Fields absent from the update keep
    /// their prior values, so successive partial updates compose.
    pub async fn update_profile(&self, update: ProfileUpdate) -> AuthResult<()> {
        if !self.begin_operation() {
            return Ok(());
        }
        let result = self.apply_profile_update(update).await;
        self.finish_operation(&result);
        result
    }

    /// Reconcile a provider-reported principal change into the session
    ///
    /// The session is replaced wholesale; `None` clears it.
    pub async fn handle_principal_change(&self, principal: Option<ProviderPrincipal>) {
        let session = self.reconciler.reconcile(principal.as_ref(), None).await;
        self.publish_session(session);
    }

    // --- operation bodies ------------------------------------------------

    async fn identifier_password_sign_in(
        &self,
        identifier: &str,
        password: &str,
    ) -> AuthResult<()> {
        let identifier = identifier.trim();
        let email = match classify_identifier(identifier) {
            LoginType::Email => identifier.to_string(),
            LoginType::Username | LoginType::Phone => self
                .directory
                .find_email_by_username(identifier)
                .await
                .map_err(AuthError::from)?
                .ok_or(AuthError::AccountNotFound)?,
            LoginType::Unknown => return Err(AuthError::IdentifierInvalid),
        };

        let principal = self
            .identity
            .sign_in_with_email_password(&email, password)
            .await?;
        let session = self.reconciler.reconcile(Some(&principal), None).await;
        self.publish_session(session);
        Ok(())
    }

    async fn google_sign_in(&self) -> AuthResult<()> {
        match self.identity.sign_in_with_google().await {
            Ok(principal) => {
                let session = self.reconciler.reconcile(Some(&principal), None).await;
                self.publish_session(session);
                Ok(())
            }
            Err(crate::errors::ProviderError::Cancelled) => {
                tracing::debug!("google sign-in cancelled by user");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn email_sign_up(&self, request: SignUpRequest) -> AuthResult<()> {
        if !self.config.allow_registration {
            return Err(AuthError::Unknown {
                message: "registration is currently disabled".to_string(),
            });
        }
        if !meets_password_policy(&request.password, self.config.min_password_length) {
            return Err(AuthError::WeakPassword);
        }
        if classify_identifier(&request.email) != LoginType::Email {
            return Err(AuthError::IdentifierInvalid);
        }

        match self.directory.is_username_available(&request.username).await {
            Ok(false) => {
                return Err(AuthError::Unknown {
                    message: format!("username \"{}\" is already taken", request.username),
                })
            }
            Ok(true) => {}
            // An availability lookup failure must not block account creation
            Err(err) => tracing::warn!(error = %err, "username availability check failed"),
        }

        let mut principal = self
            .identity
            .create_account(&request.email, &request.password)
            .await?;
        principal.display_name = Some(format!("{} {}", request.first_name, request.last_name));
        if request.phone_number.is_some() {
            principal.phone_number = request.phone_number.clone();
        }

        let session = self
            .reconciler
            .reconcile(Some(&principal), Some(&request.username))
            .await;

        if let Some(phone) = request.phone_number {
            let update = ProfileUpdate::default().with_phone_number(phone);
            if let Err(err) = self.directory.update(&principal.uid, update).await {
                tracing::warn!(uid = %principal.uid, error = %err, "storing phone number failed");
            }
        }

        self.publish_session(session);
        Ok(())
    }

    async fn request_verification_code(&self, phone_number: &str) -> AuthResult<()> {
        let phone_number = phone_number.trim();
        if phone_number.is_empty() {
            return Err(AuthError::MissingPhoneNumber);
        }
        if !is_valid_phone(phone_number) {
            return Err(AuthError::IdentifierInvalid);
        }
        self.phone_flow.send_code(phone_number).await
    }

    async fn confirm_verification_code(&self, code: &str) -> AuthResult<()> {
        let Some(mut principal) = self.phone_flow.submit_code(code).await? else {
            // Another submission was already in flight
            return Ok(());
        };

        // First-time phone accounts carry no profile; synthesize a placeholder
        // identity so the directory record and derived username are usable.
        if principal.is_first_sign_in() && principal.display_name.is_none() {
            principal.display_name = Some(placeholder_display_name());
        }

        let session = self.reconciler.reconcile(Some(&principal), None).await;
        self.publish_session(session);
        Ok(())
    }

    async fn apply_profile_update(&self, update: ProfileUpdate) -> AuthResult<()> {
        let current = self.session_tx.borrow().clone();
        let Some(mut session) = current else {
            return Ok(());
        };
        if update.is_empty() {
            return Ok(());
        }

        self.directory
            .update(&session.provider_uid, update.clone())
            .await
            .map_err(AuthError::from)?;

        session.apply(&update);
        self.publish_session(Some(session));
        Ok(())
    }

    // --- state plumbing --------------------------------------------------

    /// Claim the loading guard for a new operation
    ///
    /// Returns false when another operation is outstanding; the caller must
    /// then resolve as a no-op. Claiming the guard clears the previous error,
    /// so a fresh attempt always starts clean.
    fn begin_operation(&self) -> bool {
        let started = self.loading_tx.send_if_modified(|loading| {
            if *loading {
                false
            } else {
                *loading = true;
                true
            }
        });
        if started {
            self.error_tx.send_replace(None);
        } else {
            tracing::debug!("operation rejected, another is in progress");
        }
        started
    }

    fn finish_operation(&self, result: &AuthResult<()>) {
        if let Err(err) = result {
            self.error_tx.send_replace(Some(err.clone()));
        }
        self.loading_tx.send_replace(false);
    }

    fn publish_session(&self, session: Option<Session>) {
        self.authenticated_tx.send_replace(session.is_some());
        self.session_tx.send_replace(session);
    }
}

impl<I, O, D> AuthService<I, O, D>
where
    I: IdentityProvider + 'static,
    O: OtpProvider + 'static,
    D: UserDirectory + 'static,
{
    /// Spawn a task mirroring provider principal changes into the session
    ///
    /// The task ends when the provider drops its side of the channel.
    pub fn spawn_principal_listener(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let service = Arc::clone(self);
        let mut changes = service.identity.principal_changes();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let principal = changes.borrow_and_update().clone();
                service.handle_principal_change(principal).await;
            }
        })
    }
}

/// Placeholder shown until a first-time phone user fills in their profile
fn placeholder_display_name() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("Member {suffix:04}")
}
