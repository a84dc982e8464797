//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Session tokens, cookies and password hashing
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound email transport
//! - `environment` - Environment detection
//! - `server` - HTTP server and CORS configuration
//! - `verification` - Verification code secret and expiry window

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, SessionConfig};
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig};
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Outbound email configuration
    pub email: EmailConfig,

    /// Verification code configuration
    pub verification: VerificationConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            verification: VerificationConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Call this once at startup; the result is passed down explicitly.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut auth = AuthConfig::from_env();
        auth.session.secure = environment.is_production();

        let config = Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth,
            email: EmailConfig::from_env(),
            verification: VerificationConfig::from_env(),
            cors: CorsConfig::from_env(environment),
        };

        if config.auth.jwt.is_using_default_secret() {
            tracing::warn!("JWT_SECRET is not set; using the development default");
        }
        if config.verification.is_using_default_secret() {
            tracing::warn!("HMAC_VERIFICATION_CODE_SECRET is not set; using the development default");
        }

        config
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when it is missing or malformed.
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
