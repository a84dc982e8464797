//! Verification service module for email-based account confirmation
//!
//! This module provides the verification code workflow:
//! - Code generation and dispatch over the email transport
//! - Keyed hashing (HMAC-SHA256) of issued codes before persistence
//! - Ordered validation with a fixed expiry window
//!
//! Expiry is evaluated lazily at validation time; nothing sweeps stale codes.

mod config;
mod hasher;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use hasher::CodeHasher;
pub use service::{VerificationService, VERIFICATION_EMAIL_SUBJECT};
pub use traits::{
    Clock, CodeGenerator, EmailMessage, EmailReceipt, EmailServiceTrait, FixedCodeGenerator,
    ManualClock, RandomCodeGenerator, SystemClock,
};
pub use types::{SendCodeResult, VerifyCodeResult};
