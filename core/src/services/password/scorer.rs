//! Deterministic password strength rubric
//!
//! Scoring is purely additive: a length tier plus one bonus per character
//! class present. Advisory checks (common patterns, personal info,
//! sequential runs) only add feedback text and never change the score.

use crate::domain::value_objects::password_strength::{PasswordStrength, StrengthTier};

/// Fixed denominator used in the headline, e.g. "Strong password (31/40)".
/// The rubric tops out at 36 (25 + 2 + 2 + 3 + 4); the label deliberately
/// keeps the historical /40 that existing UI copy expects.
pub const DISPLAY_DENOMINATOR: u32 = 40;

/// Symbols that earn the symbol bonus
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>/?";

/// Substrings users reach for far too often, checked case-insensitively
const COMMON_PATTERNS: [&str; 7] = ["123", "abc", "password", "qwerty", "iloveyou", "111", "000"];

/// Ascending sequences whose 3-character windows trigger the sequence warning
const DIGIT_SEQUENCE: &str = "123456789";
const ALPHA_SEQUENCE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Personal info the password should not contain
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalHints<'a> {
    pub email: Option<&'a str>,
    pub username: Option<&'a str>,
}

/// Evaluate a password against the strength rubric
///
/// Deterministic for a given password and set of hints; cheap enough to run
/// on every keystroke.
pub fn evaluate_password_strength(password: &str, hints: PersonalHints<'_>) -> PasswordStrength {
    let mut score: u32 = 0;
    let mut feedback: Vec<String> = Vec::new();

    // Length contribution: exactly one tier applies
    let length = password.chars().count();
    let (length_points, length_message) = match length {
        l if l >= 16 => (25, "Excellent length"),
        12..=15 => (20, "Good length"),
        10..=11 => (15, "Decent length; 12 or more characters is stronger"),
        8..=9 => (10, "Meets the minimum length; aim for 12 or more characters"),
        _ => (0, "Too short; use at least 8 characters"),
    };
    score += length_points;
    feedback.push(length_message.to_string());

    // Complexity contributions: each class counts independently
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| SYMBOLS.contains(c));

    score += complexity(&mut feedback, has_upper, 2, "Contains uppercase letters", "Add uppercase letters");
    score += complexity(&mut feedback, has_lower, 2, "Contains lowercase letters", "Add lowercase letters");
    score += complexity(&mut feedback, has_digit, 3, "Contains numbers", "Add numbers");
    score += complexity(&mut feedback, has_symbol, 4, "Contains symbols", "Add a symbol such as ! @ # $");

    // Advisory checks: feedback only, never the score
    let lowered = password.to_lowercase();

    if let Some(hit) = COMMON_PATTERNS.iter().find(|p| lowered.contains(**p)) {
        feedback.push(format!("Avoid common patterns like \"{hit}\""));
    }

    if let Some(email) = hints.email {
        let local_part = email.split('@').next().unwrap_or("");
        if !local_part.is_empty() && lowered.contains(&local_part.to_lowercase()) {
            feedback.push("Avoid using part of your email address".to_string());
        }
    }

    if let Some(username) = hints.username {
        if !username.is_empty() && lowered.contains(&username.to_lowercase()) {
            feedback.push("Avoid using your username".to_string());
        }
    }

    if let Some(run) = find_sequential_run(&lowered) {
        feedback.push(format!("Avoid sequential characters like \"{run}\""));
    }

    let tier = StrengthTier::from_score(score);
    feedback.insert(0, headline(tier, score));

    PasswordStrength {
        score,
        tier,
        feedback,
    }
}

fn complexity(
    feedback: &mut Vec<String>,
    present: bool,
    points: u32,
    confirmation: &str,
    suggestion: &str,
) -> u32 {
    if present {
        feedback.push(confirmation.to_string());
        points
    } else {
        feedback.push(suggestion.to_string());
        0
    }
}

/// First ascending 3-character window from the digit or alphabet sequences
/// found in the (already lowercased) password
fn find_sequential_run(lowered: &str) -> Option<&'static str> {
    let windows = |seq: &'static str| {
        (0..seq.len().saturating_sub(2)).map(move |i| &seq[i..i + 3])
    };
    windows(DIGIT_SEQUENCE)
        .chain(windows(ALPHA_SEQUENCE))
        .find(|w| lowered.contains(w))
}

fn headline(tier: StrengthTier, score: u32) -> String {
    let label = match tier {
        StrengthTier::VeryStrong => "Very strong password",
        StrengthTier::Strong => "Strong password",
        StrengthTier::Medium => "Fair password",
        StrengthTier::Weak => "Weak password",
        StrengthTier::VeryWeak => "Very weak password",
    };
    format!("{label} ({score}/{DISPLAY_DENOMINATOR})")
}
