//! Traits for email transport, time and code generation

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

use crate::domain::entities::verification_code::VerificationCode;

/// Outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Provider acknowledgement of a send
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailReceipt {
    /// Provider-assigned message ID
    pub message_id: Option<String>,
    /// Recipients the provider accepted for delivery
    pub accepted: Vec<String>,
    /// Recipients the provider refused
    pub rejected: Vec<String>,
}

/// Trait for email transport integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a single message
    async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, String>;
    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Source of fresh verification codes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> VerificationCode;
}

/// Uniform random codes in the six-digit range
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> VerificationCode {
        VerificationCode::generate()
    }
}

/// Always yields the same code
#[derive(Debug, Clone, Copy)]
pub struct FixedCodeGenerator(pub u32);

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> VerificationCode {
        VerificationCode::from_value(self.0)
    }
}
