//! Utility functions shared across auth modules

pub mod identifier;
pub mod password;
