//! Password strength scoring.

mod scorer;

pub use scorer::{evaluate_password_strength, PersonalHints, DISPLAY_DENOMINATOR};
