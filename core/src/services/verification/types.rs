//! Types for verification service results

use chrono::{DateTime, Utc};

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// Message ID reported by the email provider, if any
    pub message_id: Option<String>,
    /// When the code was issued
    pub issued_at: DateTime<Utc>,
    /// Last instant at which the code is still accepted
    pub expires_at: DateTime<Utc>,
}

/// Outcome of checking a submitted code
///
/// A wrong code is an expected outcome rather than an error; the pending code
/// stays in place so the user can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyCodeResult {
    /// The code matched and the account is now verified
    Verified,
    /// The code did not match
    Mismatch,
}

impl VerifyCodeResult {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}
