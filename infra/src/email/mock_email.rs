//! Mock Email Service Implementation
//!
//! Logs messages instead of sending them. Every recipient is accepted unless
//! it has been marked as rejected.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use mv_core::services::verification::{EmailMessage, EmailReceipt, EmailServiceTrait};
use mv_shared::utils::email::{mask_email, normalize_email};

/// Mock email service for development and testing
#[derive(Clone, Default)]
pub struct MockEmailService {
    /// Every message handed to the service, in order
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate transport failures
    simulate_failure: Arc<AtomicBool>,
    /// Recipients the fake provider refuses
    rejected: Arc<Mutex<HashSet<String>>>,
    /// Artificial latency per send
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Messages sent so far
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.lock_sent().clone()
    }

    /// Most recent message sent to `email`
    pub fn last_message_to(&self, email: &str) -> Option<EmailMessage> {
        let email = normalize_email(email);
        self.lock_sent()
            .iter()
            .rev()
            .find(|m| normalize_email(&m.to) == email)
            .cloned()
    }

    /// Code in the bold tag of the most recent message to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        let message = self.last_message_to(email)?;
        let body = message.html_body;
        let start = body.find("<b>")? + "<b>".len();
        let end = start + body[start..].find("</b>")?;
        Some(body[start..end].to_string())
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Make the fake provider refuse a recipient
    pub fn reject_recipient(&self, email: &str) {
        self.rejected
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(normalize_email(email));
    }

    /// Delay every send by `delay`
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap_or_else(|e| e.into_inner()) = delay;
    }

    fn lock_sent(&self) -> std::sync::MutexGuard<'_, Vec<EmailMessage>> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, String> {
        let masked = mask_email(&message.to);

        let delay = *self.delay.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(to = %masked, "Mock email service simulating failure");
            return Err("Simulated email sending failure".to_string());
        }

        let refused = self
            .rejected
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&normalize_email(&message.to));

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock_sent().push(message.clone());

        // The full body (including any code) is only ever logged by the mock
        info!(
            target: "email_service",
            provider = "mock",
            to = %masked,
            message_id = %message_id,
            count = count,
            subject = %message.subject,
            body = %message.html_body,
            refused = refused,
            "Email sent (mock)"
        );

        let (accepted, rejected) = if refused {
            (vec![], vec![message.to.clone()])
        } else {
            (vec![message.to.clone()], vec![])
        };

        Ok(EmailReceipt {
            message_id: Some(message_id),
            accepted,
            rejected,
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
