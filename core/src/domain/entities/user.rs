//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mv_shared::utils::email::normalize_email;

/// User entity representing a registered account
///
/// `verification_code_hash` and `verification_issued_at` are either both set
/// (a code is pending) or both empty. Once `verified` is true they stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Public, unique handle
    pub username: String,

    /// Email address, trimmed and lowercased
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Whether the email address has been confirmed
    pub verified: bool,

    /// HMAC-SHA256 (hex) of the last issued verification code
    #[serde(skip_serializing, default)]
    pub verification_code_hash: Option<String>,

    /// When the pending verification code was issued
    #[serde(skip_serializing, default)]
    pub verification_issued_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, unverified user with no pending code
    pub fn new(username: String, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            email: normalize_email(email),
            password_hash,
            verified: false,
            verification_code_hash: None,
            verification_issued_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the pending code hash and its issue time, if both are present
    pub fn pending_code(&self) -> Option<(&str, DateTime<Utc>)> {
        match (&self.verification_code_hash, self.verification_issued_at) {
            (Some(hash), Some(issued_at)) => Some((hash.as_str(), issued_at)),
            _ => None,
        }
    }

    /// Checks if a verification code is pending
    pub fn has_pending_code(&self) -> bool {
        self.pending_code().is_some()
    }

    /// Records a freshly issued code, replacing any previous one
    pub fn issue_verification_code(&mut self, code_hash: String, issued_at: DateTime<Utc>) {
        self.verification_code_hash = Some(code_hash);
        self.verification_issued_at = Some(issued_at);
        self.updated_at = issued_at;
    }

    /// Marks the email as verified and drops the pending code
    pub fn mark_verified(&mut self, at: DateTime<Utc>) {
        self.verified = true;
        self.verification_code_hash = None;
        self.verification_issued_at = None;
        self.updated_at = at;
    }
}
