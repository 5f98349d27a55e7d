//! # Wavely Core
//!
//! Client-side authentication core for the Wavely mobile app. This crate
//! contains the session and principal domain types, the phone verification
//! state machine, the password strength scorer, the session reconciler, and
//! the `AuthService` facade that orchestrates the external identity, OTP,
//! and user-directory collaborators.

pub mod domain;
pub mod errors;
pub mod providers;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use providers::{
    IdentityProvider, InMemoryOnboardingStore, InMemoryUserDirectory, NewUserRecord,
    OnboardingStore, OtpProvider, ProfileAssetStore, UserDirectory,
};
pub use services::{
    evaluate_password_strength, AuthService, OnboardingPipeline, PersonalHints, PhoneAuthFlow,
    ResendCooldown, SessionReconciler, DISPLAY_DENOMINATOR,
};
