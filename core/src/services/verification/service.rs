//! Main verification service implementation

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use mv_shared::utils::email::{mask_email, normalize_email, same_address};

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{AuthError, DomainResult, VerificationError};
use crate::repositories::UserRepository;

use super::config::VerificationServiceConfig;
use super::hasher::CodeHasher;
use super::traits::{
    Clock, CodeGenerator, EmailMessage, EmailReceipt, EmailServiceTrait, RandomCodeGenerator,
    SystemClock,
};
use super::types::{SendCodeResult, VerifyCodeResult};

/// Subject line of verification emails
pub const VERIFICATION_EMAIL_SUBJECT: &str = "Verification Code";

/// Verification service for issuing and checking email verification codes
pub struct VerificationService<U: UserRepository, E: EmailServiceTrait + ?Sized> {
    /// User storage
    user_repository: Arc<U>,
    /// Email transport
    email_service: Arc<E>,
    /// Keyed hasher built from the configured secret
    hasher: CodeHasher,
    /// Service configuration
    config: VerificationServiceConfig,
    clock: Arc<dyn Clock>,
    code_generator: Arc<dyn CodeGenerator>,
}

impl<U: UserRepository, E: EmailServiceTrait + ?Sized> VerificationService<U, E> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - User storage implementation
    /// * `email_service` - Email transport implementation
    /// * `config` - Service configuration, including the HMAC secret
    pub fn new(
        user_repository: Arc<U>,
        email_service: Arc<E>,
        config: VerificationServiceConfig,
    ) -> DomainResult<Self> {
        let hasher = CodeHasher::new(config.hmac_secret.as_bytes())?;

        Ok(Self {
            user_repository,
            email_service,
            hasher,
            config,
            clock: Arc::new(SystemClock),
            code_generator: Arc::new(RandomCodeGenerator),
        })
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the code generator
    pub fn with_code_generator(mut self, code_generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = code_generator;
        self
    }

    /// Look up a user by email and issue them a fresh code
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Code emailed and its hash persisted
    /// * `Err(DomainError)` - `UserNotFound`, or any error from [`Self::generate`]
    pub async fn request_verification_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        let user = self.find_user(email).await?;
        self.generate(user).await
    }

    /// Look up a user by email and check the code they submitted
    pub async fn confirm_verification_code(
        &self,
        email: &str,
        provided_code: &str,
    ) -> DomainResult<VerifyCodeResult> {
        let user = self.find_user(email).await?;
        self.validate(user, provided_code).await
    }

    /// Issue a verification code to a user
    ///
    /// This method:
    /// 1. Refuses users that are already verified
    /// 2. Draws a new code and emails it, bounded by the send timeout
    /// 3. Requires the provider to accept the user's own address
    /// 4. Persists the keyed hash and the issue time, replacing any older code
    ///
    /// Nothing is persisted unless the provider accepted the recipient.
    pub async fn generate(&self, mut user: User) -> DomainResult<SendCodeResult> {
        let masked = mask_email(&user.email);

        if user.verified {
            tracing::warn!(
                email = %masked,
                event = "verification_code_refused",
                "Verification code requested for an already verified account"
            );
            return Err(VerificationError::AlreadyVerified.into());
        }

        let code = self.code_generator.generate();
        let message = self.compose_message(&user.email, &code);
        let receipt = self.dispatch(&message, &masked).await?;

        let accepted = receipt
            .accepted
            .first()
            .map(|recipient| same_address(recipient, &user.email))
            .unwrap_or(false);
        if !accepted {
            tracing::warn!(
                email = %masked,
                accepted = receipt.accepted.len(),
                rejected = receipt.rejected.len(),
                event = "verification_email_rejected",
                "Email provider did not accept the recipient"
            );
            return Err(VerificationError::EmailRejected {
                recipient: user.email.clone(),
            }
            .into());
        }

        let issued_at = self.clock.now();
        user.issue_verification_code(self.hasher.hash(code.as_str()), issued_at);

        self.user_repository.update(user).await.map_err(|e| {
            tracing::error!(
                email = %masked,
                error = %e,
                event = "verification_code_storage_failed",
                "Failed to store verification code"
            );
            e
        })?;

        tracing::info!(
            email = %masked,
            provider = self.email_service.provider_name(),
            event = "verification_code_sent",
            "Verification code sent"
        );

        Ok(SendCodeResult {
            message_id: receipt.message_id,
            issued_at,
            expires_at: issued_at + Duration::milliseconds(self.config.code_expiry_ms),
        })
    }

    /// Check a submitted code against the user's pending code
    ///
    /// Checks run in order and the first failure wins:
    /// 1. `AlreadyVerified` if the account is verified
    /// 2. `NoCodeIssued` if no code is pending
    /// 3. `CodeExpired` if more than the expiry window has passed since issue
    /// 4. Keyed-hash comparison of the canonical code
    ///
    /// On a match the account is marked verified and the pending code cleared.
    /// On a mismatch nothing is written and `Ok(VerifyCodeResult::Mismatch)`
    /// is returned.
    pub async fn validate(
        &self,
        mut user: User,
        provided_code: &str,
    ) -> DomainResult<VerifyCodeResult> {
        let masked = mask_email(&user.email);

        if user.verified {
            return Err(VerificationError::AlreadyVerified.into());
        }

        let (stored_hash, issued_at) = match user.pending_code() {
            Some((hash, issued_at)) => (hash.to_string(), issued_at),
            None => return Err(VerificationError::NoCodeIssued.into()),
        };

        let now = self.clock.now();
        if self.is_expired(issued_at, now) {
            tracing::info!(
                email = %masked,
                issued_at = %issued_at,
                event = "verification_code_expired",
                "Verification code expired"
            );
            return Err(VerificationError::CodeExpired.into());
        }

        let matches = VerificationCode::canonicalize(provided_code)
            .map(|code| self.hasher.verify(&code, &stored_hash))
            .unwrap_or(false);

        if !matches {
            tracing::warn!(
                email = %masked,
                event = "verification_code_mismatch",
                "Verification code did not match"
            );
            return Ok(VerifyCodeResult::Mismatch);
        }

        user.mark_verified(now);
        self.user_repository.update(user).await.map_err(|e| {
            tracing::error!(
                email = %masked,
                error = %e,
                event = "verification_storage_failed",
                "Failed to persist verified account"
            );
            e
        })?;

        tracing::info!(
            email = %masked,
            event = "account_verified",
            "Account verified"
        );

        Ok(VerifyCodeResult::Verified)
    }

    async fn find_user(&self, email: &str) -> DomainResult<User> {
        let email = normalize_email(email);
        self.user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    async fn dispatch(&self, message: &EmailMessage, masked: &str) -> DomainResult<EmailReceipt> {
        let send = self.email_service.send_email(message);

        match tokio::time::timeout(self.config.send_timeout, send).await {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(e)) => {
                tracing::error!(
                    email = %masked,
                    provider = self.email_service.provider_name(),
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to send verification email"
                );
                Err(VerificationError::EmailTransport { message: e }.into())
            }
            Err(_) => {
                tracing::error!(
                    email = %masked,
                    provider = self.email_service.provider_name(),
                    timeout_secs = self.config.send_timeout.as_secs(),
                    event = "verification_email_timeout",
                    "Verification email send timed out"
                );
                Err(VerificationError::EmailTimeout {
                    seconds: self.config.send_timeout.as_secs(),
                }
                .into())
            }
        }
    }

    fn compose_message(&self, to: &str, code: &VerificationCode) -> EmailMessage {
        EmailMessage {
            from: self.config.from_address.clone(),
            to: to.to_string(),
            subject: VERIFICATION_EMAIL_SUBJECT.to_string(),
            html_body: format!("Your verification code is <b>{}</b>", code),
        }
    }

    /// Strictly greater than the window: a code checked at exactly the
    /// boundary is still valid.
    fn is_expired(&self, issued_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        (now - issued_at).num_milliseconds() > self.config.code_expiry_ms
    }
}
