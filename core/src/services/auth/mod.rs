//! Authentication facade.

mod service;

pub use service::{AuthService, SignUpRequest};

#[cfg(test)]
mod tests;
