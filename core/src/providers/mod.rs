//! Contracts for the external collaborators the auth core orchestrates.
//!
//! The real implementations wrap native SDKs (OAuth popups, SMS dispatch,
//! remote user records). Each contract ships with an in-memory implementation
//! used in tests and demos.

pub mod directory;
pub mod identity;
pub mod onboarding;
pub mod otp;

pub use directory::{InMemoryUserDirectory, NewUserRecord, UserDirectory};
pub use identity::IdentityProvider;
pub use onboarding::{InMemoryOnboardingStore, OnboardingStore, ProfileAssetStore};
pub use otp::OtpProvider;
