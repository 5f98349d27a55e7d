//! Shared utilities and common types for the Wavely auth core
//!
//! This crate provides functionality used across the auth modules:
//! - Configuration types
//! - Identifier classification (email / username / phone)
//! - Password policy checks
//! - Phone number utilities

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AuthFlowConfig, DirectoryConfig};
pub use utils::identifier::{
    classify_identifier, mask_phone_number, normalize_phone_number, LoginType,
};
pub use utils::password::meets_password_policy;
