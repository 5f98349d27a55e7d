//! Error taxonomy for authentication operations
//!
//! Provider- and directory-raised errors are mapped into `AuthError` at the
//! service boundary; nothing below that boundary surfaces raw provider
//! failures to observers.

use thiserror::Error;

/// Normalized authentication errors published to the UI
///
/// `Clone` and `PartialEq` are required because the last error is published
/// through a watch channel and compared in observers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect password or verification code")]
    InvalidCredential,

    #[error("No account found for this identifier")]
    AccountNotFound,

    #[error("That doesn't look like a valid email, username, or phone number")]
    IdentifierInvalid,

    #[error("Network error, please check your connection and try again")]
    NetworkError,

    #[error("Too many attempts, please try again later")]
    RateLimited,

    #[error("An account with this email already exists")]
    EmailAlreadyInUse,

    #[error("Password must be at least 8 characters with uppercase and lowercase letters")]
    WeakPassword,

    #[error("Verification session expired, please request a new code")]
    SessionExpired,

    #[error("A phone number is required")]
    MissingPhoneNumber,

    #[error("{message}")]
    Unknown { message: String },
}

/// Errors raised by the external identity and OTP providers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("network unavailable")]
    Network,

    #[error("invalid credential")]
    InvalidCredential,

    #[error("no provider account for this identity")]
    UserNotFound,

    #[error("malformed identifier")]
    InvalidIdentifier,

    #[error("email already registered")]
    EmailInUse,

    #[error("password rejected as too weak")]
    WeakPassword,

    #[error("too many requests")]
    TooManyRequests,

    #[error("verification session expired")]
    SessionExpired,

    #[error("user cancelled the sign-in")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Whether a failed code submission may be retried against the same
    /// verification session
    pub fn is_transient(&self) -> bool {
        !matches!(self, ProviderError::SessionExpired)
    }
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Network => AuthError::NetworkError,
            ProviderError::InvalidCredential => AuthError::InvalidCredential,
            ProviderError::UserNotFound => AuthError::AccountNotFound,
            ProviderError::InvalidIdentifier => AuthError::IdentifierInvalid,
            ProviderError::EmailInUse => AuthError::EmailAlreadyInUse,
            ProviderError::WeakPassword => AuthError::WeakPassword,
            ProviderError::TooManyRequests => AuthError::RateLimited,
            ProviderError::SessionExpired => AuthError::SessionExpired,
            // Cancellation is normally intercepted before mapping; if it does
            // reach here, keep the original message.
            ProviderError::Cancelled => AuthError::Unknown {
                message: err.to_string(),
            },
            ProviderError::Other(message) => AuthError::Unknown { message },
        }
    }
}

/// Errors raised by the user directory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("user directory unavailable: {message}")]
    Unavailable { message: String },

    #[error("duplicate record: {field}")]
    Duplicate { field: String },

    #[error("record not found")]
    NotFound,
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Unavailable { .. } => AuthError::NetworkError,
            DirectoryError::NotFound => AuthError::AccountNotFound,
            DirectoryError::Duplicate { field } => AuthError::Unknown {
                message: format!("duplicate record: {field}"),
            },
        }
    }
}
