//! Email Service Module
//!
//! Email transports implementing the core `EmailServiceTrait`:
//!
//! - **Mock Implementation**: Logs messages and records them for tests
//! - **HTTP Implementation**: JSON API of a transactional mail provider

use std::sync::Arc;
use std::time::Duration;

use mv_core::services::verification::EmailServiceTrait;
use mv_shared::config::EmailConfig;

use crate::InfrastructureError;

pub mod http_email;
pub mod mock_email;

pub use http_email::{HttpEmailConfig, HttpEmailService};
pub use mock_email::MockEmailService;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// Returns the implementation named by `config.provider`. Unknown providers
/// fall back to the mock transport with a warning.
///
/// # Errors
///
/// * `InfrastructureError::Config` - `http` selected without `EMAIL_API_URL`
pub fn create_email_service(
    config: &EmailConfig,
) -> Result<Arc<dyn EmailServiceTrait>, InfrastructureError> {
    match config.provider.trim().to_ascii_lowercase().as_str() {
        "mock" => Ok(Arc::new(MockEmailService::new())),
        "http" => {
            let api_url = config.api_url.clone().ok_or_else(|| {
                InfrastructureError::Config("EMAIL_API_URL is required for the http provider".into())
            })?;

            let http_config = HttpEmailConfig {
                api_url,
                api_key: config.api_key.clone(),
                request_timeout: Duration::from_secs(config.send_timeout_secs),
            };
            Ok(Arc::new(HttpEmailService::new(http_config)?))
        }
        other => {
            tracing::warn!(
                provider = other,
                "Unknown email provider, using mock implementation"
            );
            Ok(Arc::new(MockEmailService::new()))
        }
    }
}
