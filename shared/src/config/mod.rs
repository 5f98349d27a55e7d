//! Configuration module
//!
//! Configuration is resolved once at application startup and injected into
//! the services that need it:
//! - `auth` - Authentication flow knobs (cooldowns, code length, password policy)
//! - `directory` - User directory backend selection

pub mod auth;
pub mod directory;

pub use auth::AuthFlowConfig;
pub use directory::DirectoryConfig;
