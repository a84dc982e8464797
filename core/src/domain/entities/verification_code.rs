//! Verification code value type for email confirmation.

use rand::Rng;
use std::fmt;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Number of digits in an issued code
pub const CODE_LENGTH: usize = 6;

/// Default validity window of an issued code (5 minutes)
pub const DEFAULT_EXPIRY_MS: i64 = 300_000;

/// A six-digit verification code in plaintext.
///
/// Only ever held in memory between generation and dispatch; the user record
/// stores its keyed hash.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Draws a uniformly random code in `CODE_MIN..=CODE_MAX`
    pub fn generate() -> Self {
        let value = rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX);
        Self(value.to_string())
    }

    /// Builds a code from a known value (tests, fixed generators)
    pub fn from_value(value: u32) -> Self {
        Self(value.to_string())
    }

    /// The code as sent to the user
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Coerce a caller-supplied code into its canonical string form.
    ///
    /// Clients may submit the code as a JSON number or a string, so leading
    /// zeros, an explicit `+` sign and surrounding whitespace are dropped:
    /// `" 0482913"` becomes `"482913"`. Returns `None` for anything that is
    /// not a non-negative integer.
    pub fn canonicalize(input: &str) -> Option<String> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            Some("0".to_string())
        } else {
            Some(significant.to_string())
        }
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}
