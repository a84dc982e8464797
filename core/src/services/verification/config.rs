//! Configuration for the verification service

use std::time::Duration;

use mv_shared::config::{EmailConfig, VerificationConfig};

use crate::domain::entities::verification_code::DEFAULT_EXPIRY_MS;

/// Configuration for the verification service
///
/// The HMAC secret is fixed for the lifetime of the service.
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Key for the HMAC-SHA256 of issued codes
    pub hmac_secret: String,
    /// Milliseconds after issuance during which a code is accepted
    pub code_expiry_ms: i64,
    /// Sender address for verification emails
    pub from_address: String,
    /// Upper bound on a single email send
    pub send_timeout: Duration,
}

impl VerificationServiceConfig {
    /// Create a configuration with default expiry and timeout
    pub fn new(hmac_secret: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            hmac_secret: hmac_secret.into(),
            from_address: from_address.into(),
            ..Default::default()
        }
    }

    /// Build from the application-level configuration sections
    pub fn from_app_config(verification: &VerificationConfig, email: &EmailConfig) -> Self {
        Self {
            hmac_secret: verification.hmac_secret.clone(),
            code_expiry_ms: verification.code_expiry_ms,
            from_address: email.from_address.clone(),
            send_timeout: Duration::from_secs(email.send_timeout_secs),
        }
    }

    /// Override the send timeout
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            hmac_secret: String::new(),
            code_expiry_ms: DEFAULT_EXPIRY_MS,
            from_address: String::from("no-reply@mailverify.local"),
            send_timeout: Duration::from_secs(10),
        }
    }
}
