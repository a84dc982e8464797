//! HTTP Email Service Implementation
//!
//! Sends mail through a transactional-mail JSON API:
//!
//! ```text
//! POST {api_url}
//! Authorization: Bearer {api_key}
//! { "from": "...", "to": ["..."], "subject": "...", "html": "..." }
//!
//! 200 { "id": "...", "accepted": ["..."], "rejected": [] }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use mv_core::services::verification::{EmailMessage, EmailReceipt, EmailServiceTrait};
use mv_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// Connection settings for the mail API
#[derive(Debug, Clone)]
pub struct HttpEmailConfig {
    /// Full URL of the send endpoint
    pub api_url: String,
    /// Bearer credential, if the provider requires one
    pub api_key: Option<String>,
    /// Per-request timeout enforced by the HTTP client
    pub request_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    accepted: Vec<String>,
    #[serde(default)]
    rejected: Vec<String>,
}

/// Email transport backed by an HTTP mail API
pub struct HttpEmailService {
    client: reqwest::Client,
    config: HttpEmailConfig,
}

impl HttpEmailService {
    /// Build the HTTP client
    pub fn new(config: HttpEmailConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    async fn send(&self, message: &EmailMessage) -> Result<EmailReceipt, InfrastructureError> {
        let body = SendEmailRequest {
            from: &message.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html_body,
        };

        let mut request = self.client.post(&self.config.api_url).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Email(format!(
                "provider returned {}: {}",
                status, detail
            )));
        }

        let parsed: SendEmailResponse = response.json().await?;

        Ok(EmailReceipt {
            message_id: parsed.id,
            accepted: parsed.accepted,
            rejected: parsed.rejected,
        })
    }
}

#[async_trait]
impl EmailServiceTrait for HttpEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, String> {
        match self.send(message).await {
            Ok(receipt) => {
                tracing::info!(
                    target: "email_service",
                    provider = "http",
                    to = %mask_email(&message.to),
                    message_id = ?receipt.message_id,
                    accepted = receipt.accepted.len(),
                    "Email handed to provider"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!(
                    target: "email_service",
                    provider = "http",
                    to = %mask_email(&message.to),
                    error = %e,
                    "Email provider request failed"
                );
                Err(e.to_string())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}
