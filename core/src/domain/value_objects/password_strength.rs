//! Password strength value types.

use serde::{Deserialize, Serialize};

/// Ordered strength classification derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTier {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    /// Assigns a tier from a total score, highest threshold first
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 35 => StrengthTier::VeryStrong,
            s if s >= 28 => StrengthTier::Strong,
            s if s >= 20 => StrengthTier::Medium,
            s if s >= 12 => StrengthTier::Weak,
            _ => StrengthTier::VeryWeak,
        }
    }
}

/// Result of evaluating a password against the strength rubric
///
/// Recomputed on every keystroke; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrength {
    /// Total additive score
    pub score: u32,

    /// Tier assigned from the score
    pub tier: StrengthTier,

    /// Headline first, then itemized diagnostics in evaluation order
    pub feedback: Vec<String>,
}
