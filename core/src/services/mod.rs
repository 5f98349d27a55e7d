//! Services containing the authentication business logic.

pub mod auth;
pub mod onboarding;
pub mod password;
pub mod phone;
pub mod session;

// Re-export commonly used types
pub use auth::AuthService;
pub use onboarding::{OnboardingFailure, OnboardingOutcome, OnboardingPipeline, OnboardingStep};
pub use password::{evaluate_password_strength, PersonalHints, DISPLAY_DENOMINATOR};
pub use phone::{PhoneAuthFlow, ResendCooldown};
pub use session::SessionReconciler;
