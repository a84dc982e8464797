//! Verification code configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

const DEFAULT_HMAC_SECRET: &str = "development-hmac-secret-please-change";

/// Verification code validity window (5 minutes)
pub const DEFAULT_CODE_EXPIRY_MS: i64 = 5 * 60 * 1000;

/// Secret and expiry settings for email verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Server-held key for the HMAC-SHA256 of issued codes
    pub hmac_secret: String,

    /// Validity window of an issued code in milliseconds
    pub code_expiry_ms: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            hmac_secret: String::from(DEFAULT_HMAC_SECRET),
            code_expiry_ms: DEFAULT_CODE_EXPIRY_MS,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            hmac_secret: std::env::var("HMAC_VERIFICATION_CODE_SECRET")
                .unwrap_or_else(|_| DEFAULT_HMAC_SECRET.to_string()),
            code_expiry_ms: positive_expiry(env_parse(
                "VERIFICATION_CODE_EXPIRY_MS",
                DEFAULT_CODE_EXPIRY_MS,
            )),
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.hmac_secret == DEFAULT_HMAC_SECRET
    }
}

/// A window of zero or less would expire every code on issue
fn positive_expiry(expiry_ms: i64) -> i64 {
    if expiry_ms > 0 {
        return expiry_ms;
    }
    tracing::warn!(
        expiry_ms,
        "VERIFICATION_CODE_EXPIRY_MS must be positive; using the default"
    );
    DEFAULT_CODE_EXPIRY_MS
}
