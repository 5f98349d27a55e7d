//! Identifier classification utilities
//!
//! Classifies a raw login identifier as an email address, a username, or a
//! phone number. Classification is pure and cheap enough to run on every
//! keystroke.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Local part, @, domain with at least one dot, alphabetic TLD of 2-64 chars
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,64}$").unwrap()
});

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9.-]{3,30}$").unwrap());

// E.164-like: optional leading +, no leading zero, at most 15 digits
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

/// Minimum length of a normalized phone number
const MIN_PHONE_LENGTH: usize = 8;

/// Kind of login identifier a user typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    Email,
    Username,
    Phone,
    Unknown,
}

/// Classify a raw identifier string
///
/// Patterns are tried in priority order: email, then username, then phone.
/// The first match wins; anything else is `Unknown`.
pub fn classify_identifier(input: &str) -> LoginType {
    let trimmed = input.trim();
    if EMAIL_REGEX.is_match(trimmed) {
        LoginType::Email
    } else if USERNAME_REGEX.is_match(trimmed) {
        LoginType::Username
    } else if is_valid_phone(trimmed) {
        LoginType::Phone
    } else {
        LoginType::Unknown
    }
}

/// Normalize a phone number by stripping formatting characters
///
/// Keeps ascii digits and a single leading `+`; everything else is dropped.
pub fn normalize_phone_number(phone: &str) -> String {
    let mut normalized = String::with_capacity(phone.len());
    for c in phone.chars() {
        if c.is_ascii_digit() || (c == '+' && normalized.is_empty()) {
            normalized.push(c);
        }
    }
    normalized
}

/// Check whether a string is a plausible phone number
///
/// The normalized form must match the E.164-like pattern and be at least
/// eight characters long. Both conditions are required.
pub fn is_valid_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    normalized.len() >= MIN_PHONE_LENGTH && PHONE_REGEX.is_match(&normalized)
}

/// Mask a phone number for log output (e.g. +15551234567 -> +15****4567)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
