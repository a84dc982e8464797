//! Integration tests for the signup → verify email lifecycle

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;

use mv_core::errors::{DomainError, VerificationError};
use mv_core::repositories::{MockUserRepository, UserRepository};
use mv_core::services::auth::{AuthService, AuthServiceConfig};
use mv_core::services::token::{TokenService, TokenServiceConfig};
use mv_core::services::verification::{
    EmailMessage, EmailReceipt, EmailServiceTrait, FixedCodeGenerator, ManualClock,
    VerificationService, VerificationServiceConfig, VerifyCodeResult,
};

// Records messages and accepts every recipient
struct RecordingEmailService {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmailService {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailServiceTrait for RecordingEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<EmailReceipt, String> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(EmailReceipt {
            message_id: Some(format!("msg-{}", self.count())),
            accepted: vec![message.to.clone()],
            rejected: vec![],
        })
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

struct World {
    repo: Arc<MockUserRepository>,
    email: Arc<RecordingEmailService>,
    clock: Arc<ManualClock>,
    auth: AuthService<MockUserRepository>,
}

fn world() -> World {
    let repo = Arc::new(MockUserRepository::new());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::default()));
    let auth = AuthService::new(repo.clone(), token_service, AuthServiceConfig { bcrypt_cost: 4 });

    World {
        repo,
        email: Arc::new(RecordingEmailService::new()),
        clock: Arc::new(ManualClock::default()),
        auth,
    }
}

fn verification(
    world: &World,
    code: u32,
) -> VerificationService<MockUserRepository, RecordingEmailService> {
    VerificationService::new(
        world.repo.clone(),
        world.email.clone(),
        VerificationServiceConfig::new("integration-secret", "codes@mailverify.test"),
    )
    .unwrap()
    .with_clock(world.clock.clone())
    .with_code_generator(Arc::new(FixedCodeGenerator(code)))
}

#[tokio::test]
async fn test_signup_verify_then_signin_reports_verified() {
    let world = world();
    world.auth.signup("ab", "a@b.com", "secret123").await.unwrap();
    let service = verification(&world, 482913);

    service.request_verification_code("a@b.com").await.unwrap();
    assert_eq!(world.email.count(), 1);

    let result = service
        .confirm_verification_code("a@b.com", "482913")
        .await
        .unwrap();
    assert_eq!(result, VerifyCodeResult::Verified);

    let err = service
        .confirm_verification_code("a@b.com", "482913")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::AlreadyVerified)
    ));

    let session = world.auth.signin("a@b.com", "secret123").await.unwrap();
    assert!(session.verified);
    assert!(world.auth.verify_session_token(&session.token).unwrap().verified);
}

#[tokio::test]
async fn test_expired_code_requires_a_new_one() {
    let world = world();
    world.auth.signup("ab", "a@b.com", "secret123").await.unwrap();

    let first = verification(&world, 111222);
    first.request_verification_code("a@b.com").await.unwrap();
    world.clock.advance(Duration::seconds(301));

    let err = first
        .confirm_verification_code("a@b.com", "111222")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::CodeExpired)
    ));

    let second = verification(&world, 333444);
    second.request_verification_code("a@b.com").await.unwrap();

    let result = second
        .confirm_verification_code("a@b.com", "333444")
        .await
        .unwrap();
    assert_eq!(result, VerifyCodeResult::Verified);

    let user = world.repo.find_by_email("a@b.com").await.unwrap().unwrap();
    assert!(user.verified);
    assert!(!user.has_pending_code());
}
