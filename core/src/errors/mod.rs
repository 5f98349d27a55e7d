//! Error types for the authentication core.

mod types;

pub use types::{AuthError, DirectoryError, ProviderError};

/// Result alias used throughout the auth services
pub type AuthResult<T> = Result<T, AuthError>;
