//! Minimum password policy
//!
//! This is the gating check used to permit sign-up. The richer strength
//! scorer lives in the core crate and never gates anything.

/// Check a password against the minimum policy
///
/// A password passes iff it has at least `min_length` characters and contains
/// at least one uppercase and one lowercase letter. The minimum length comes
/// from `AuthFlowConfig` and defaults to eight.
pub fn meets_password_policy(password: &str, min_length: usize) -> bool {
    password.chars().count() >= min_length
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
}
