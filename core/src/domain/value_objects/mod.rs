//! Value objects for the authentication domain.

pub mod password_strength;
pub mod phone_auth;
pub mod profile;

pub use password_strength::{PasswordStrength, StrengthTier};
pub use phone_auth::{PhoneAuthState, VerificationId};
pub use profile::ProfileUpdate;
