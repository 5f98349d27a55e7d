//! Phone verification state machine
//!
//! Drives the send/verify/resend lifecycle against the OTP provider and
//! publishes every transition through a watch channel. The verification id
//! handed back by the provider is held only while a code is awaited and is
//! cleared on every transition out of that state, except transient
//! verification failures where the same session may be retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::domain::entities::principal::ProviderPrincipal;
use crate::domain::value_objects::phone_auth::{PhoneAuthState, VerificationId};
use crate::errors::{AuthError, AuthResult};
use crate::providers::otp::OtpProvider;
use crate::services::phone::cooldown::ResendCooldown;

use wavely_shared::mask_phone_number;

/// Releases the in-flight flag when a send or submit attempt resolves
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// State machine for the phone OTP flow
pub struct PhoneAuthFlow<O: OtpProvider> {
    otp: Arc<O>,
    state_tx: watch::Sender<PhoneAuthState>,
    verification_id: Mutex<Option<VerificationId>>,
    code_buffer: Mutex<String>,
    cooldown: ResendCooldown,
    resend_cooldown_secs: u32,
    code_length: usize,
    in_flight: AtomicBool,
}

impl<O: OtpProvider> PhoneAuthFlow<O> {
    pub fn new(otp: Arc<O>, resend_cooldown_secs: u32, code_length: usize) -> Self {
        let (state_tx, _) = watch::channel(PhoneAuthState::Idle);
        Self {
            otp,
            state_tx,
            verification_id: Mutex::new(None),
            code_buffer: Mutex::new(String::new()),
            cooldown: ResendCooldown::new(),
            resend_cooldown_secs,
            code_length,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Request a verification code for a phone number
    ///
    /// Allowed from `Idle`, `Error`, and `AwaitingVerification` (resend).
    /// A no-op while another send or submit is in flight.
    pub async fn send_code(&self, phone_number: &str) -> AuthResult<()> {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!(
                phone = %mask_phone_number(phone_number),
                "send_code ignored, request already in flight"
            );
            return Ok(());
        };

        self.clear_verification_id();
        self.state_tx.send_replace(PhoneAuthState::SendingCode);
        tracing::info!(phone = %mask_phone_number(phone_number), "requesting verification code");

        match self.otp.request_code(phone_number).await {
            Ok(verification_id) => {
                *self.verification_id.lock().unwrap() = Some(verification_id);
                self.code_buffer.lock().unwrap().clear();
                self.state_tx
                    .send_replace(PhoneAuthState::AwaitingVerification {
                        phone_number: phone_number.to_string(),
                    });
                self.cooldown.start(self.resend_cooldown_secs);
                Ok(())
            }
            Err(provider_err) => {
                let err = AuthError::from(provider_err);
                self.state_tx.send_replace(PhoneAuthState::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Submit a verification code
    ///
    /// The state stays `AwaitingVerification` while the request is in flight.
    /// Returns `Ok(None)` when another request is already running (no-op).
    pub async fn submit_code(&self, code: &str) -> AuthResult<Option<ProviderPrincipal>> {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("submit_code ignored, request already in flight");
            return Ok(None);
        };

        let verification_id = self.verification_id.lock().unwrap().clone();
        let Some(verification_id) = verification_id else {
            // No verification session to confirm against; the state is left
            // as it stands.
            return Err(AuthError::SessionExpired);
        };

        match self.otp.confirm_code(&verification_id, code).await {
            Ok(principal) => {
                self.clear_verification_id();
                self.code_buffer.lock().unwrap().clear();
                self.cooldown.reset();
                self.state_tx.send_replace(PhoneAuthState::Verified);
                Ok(Some(principal))
            }
            Err(provider_err) => {
                // An expired verification session requires a fresh send_code;
                // transient failures may retry against the same session.
                if !provider_err.is_transient() {
                    self.clear_verification_id();
                }
                let err = AuthError::from(provider_err);
                self.state_tx.send_replace(PhoneAuthState::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Feed keystrokes into the code entry buffer
    ///
    /// Non-digits are filtered silently and digits beyond the code length are
    /// truncated. Returns the full code exactly once, on the keystroke that
    /// completes it; the caller dispatches `submit_code` with it.
    pub fn append_code_digits(&self, input: &str) -> Option<String> {
        let mut buffer = self.code_buffer.lock().unwrap();
        if buffer.len() >= self.code_length {
            return None;
        }
        for c in input.chars().filter(|c| c.is_ascii_digit()) {
            buffer.push(c);
            if buffer.len() == self.code_length {
                return Some(buffer.clone());
            }
        }
        None
    }

    /// Clear the code entry buffer
    pub fn clear_code_buffer(&self) {
        self.code_buffer.lock().unwrap().clear();
    }

    /// Return to `Idle`, dropping the verification session and the cooldown
    pub fn reset(&self) {
        self.clear_verification_id();
        self.code_buffer.lock().unwrap().clear();
        self.cooldown.reset();
        self.state_tx.send_replace(PhoneAuthState::Idle);
    }

    /// Current state snapshot
    pub fn state(&self) -> PhoneAuthState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state transitions
    pub fn subscribe_state(&self) -> watch::Receiver<PhoneAuthState> {
        self.state_tx.subscribe()
    }

    /// Subscribe to the resend cooldown countdown
    pub fn subscribe_cooldown(&self) -> watch::Receiver<u32> {
        self.cooldown.subscribe()
    }

    /// Whether the user may request another code
    pub fn can_resend(&self) -> bool {
        self.cooldown.can_resend()
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(InFlightGuard(&self.in_flight))
        }
    }

    fn clear_verification_id(&self) {
        self.verification_id.lock().unwrap().take();
    }

    #[cfg(test)]
    fn has_verification_id(&self) -> bool {
        self.verification_id.lock().unwrap().is_some()
    }
}
