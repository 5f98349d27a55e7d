//! Session reconciler
//!
//! Merges a freshly-authenticated provider principal into the local session
//! and the remote user directory: create-if-absent, else touch last-login.
//! The local session is built from the principal alone and is committed
//! whether or not the directory side effects succeed; remote failures are
//! logged and never block sign-in.

use std::sync::Arc;

use crate::domain::entities::principal::ProviderPrincipal;
use crate::domain::entities::session::Session;
use crate::providers::directory::{NewUserRecord, UserDirectory};

/// Minimum length of a derived username
const MIN_USERNAME_LENGTH: usize = 3;

/// Derive a username from a display name
///
/// Lowercases the name and replaces spaces with dots. Results shorter than
/// three characters are rejected.
pub fn derive_username(display_name: Option<&str>) -> Option<String> {
    let name = display_name?.trim().to_lowercase().replace(' ', ".");
    if name.chars().count() >= MIN_USERNAME_LENGTH {
        Some(name)
    } else {
        None
    }
}

/// Reconciles provider sign-in results into the authoritative local session
pub struct SessionReconciler<D: UserDirectory> {
    directory: Arc<D>,
}

impl<D: UserDirectory> SessionReconciler<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Reconcile a provider principal into a session snapshot
    ///
    /// * `None` principal clears the session.
    /// * An unknown uid gets a directory record created, with the chosen
    ///   username or one derived from the display name.
    /// * A known uid gets its last-login stamped, fire-and-forget.
    ///
    /// Idempotent: reconciling the same principal repeatedly yields the same
    /// session fields and at most one directory record.
    pub async fn reconcile(
        &self,
        principal: Option<&ProviderPrincipal>,
        chosen_username: Option<&str>,
    ) -> Option<Session> {
        let principal = principal?;

        let username = chosen_username
            .map(String::from)
            .or_else(|| derive_username(principal.display_name.as_deref()));

        match self.directory.exists(&principal.uid).await {
            Ok(false) => {
                let record = NewUserRecord {
                    uid: principal.uid.clone(),
                    display_name: principal.display_name.clone(),
                    email: principal.email.clone(),
                    photo_url: principal.photo_url.clone(),
                    username: username.clone(),
                };
                if let Err(err) = self.directory.create(record).await {
                    tracing::warn!(uid = %principal.uid, error = %err, "directory create failed");
                }
            }
            Ok(true) => {
                if let Err(err) = self.directory.touch_last_login(&principal.uid).await {
                    tracing::warn!(uid = %principal.uid, error = %err, "touch_last_login failed");
                }
            }
            Err(err) => {
                tracing::warn!(uid = %principal.uid, error = %err, "directory lookup failed");
            }
        }

        // The session is committed from the principal regardless of how the
        // directory side effects fared above.
        Some(Session::from_principal(principal, username))
    }
}
