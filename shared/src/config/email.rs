//! Outbound email transport configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Email transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider name ("mock" or "http")
    pub provider: String,

    /// Endpoint of the transactional mail HTTP API
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer credential for the mail API
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address used for verification messages
    pub from_address: String,

    /// Upper bound on a single send call, in seconds
    pub send_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: None,
            api_key: None,
            from_address: String::from("no-reply@mailverify.local"),
            send_timeout_secs: 10,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            api_url: std::env::var("EMAIL_API_URL").ok(),
            api_key: std::env::var("EMAIL_API_KEY").ok(),
            from_address: std::env::var("NODE_CODE_SENDING_EMAIL_ADDRESS")
                .or_else(|_| std::env::var("EMAIL_FROM_ADDRESS"))
                .unwrap_or(defaults.from_address),
            send_timeout_secs: env_parse("EMAIL_SEND_TIMEOUT_SECS", defaults.send_timeout_secs),
        }
    }

    /// Whether the mock transport will be used
    ///
    /// Anything other than `http` falls back to the mock.
    pub fn is_mock(&self) -> bool {
        !self.provider.trim().eq_ignore_ascii_case("http")
    }
}
