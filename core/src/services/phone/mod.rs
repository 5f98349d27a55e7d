//! Phone OTP verification flow.

mod cooldown;
mod flow;

pub use cooldown::ResendCooldown;
pub use flow::PhoneAuthFlow;
