//! Unit tests for verification service

use chrono::Duration;
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, VerificationError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::verification::{
    CodeHasher, FixedCodeGenerator, ManualClock, VerificationService, VerificationServiceConfig,
    VerifyCodeResult, VERIFICATION_EMAIL_SUBJECT,
};

use super::mocks::{EmailBehavior, MockEmailService};

const SECRET: &str = "test-hmac-secret";
const SENDER: &str = "codes@mailverify.test";

struct Harness {
    repo: Arc<MockUserRepository>,
    email: Arc<MockEmailService>,
    clock: Arc<ManualClock>,
    service: VerificationService<MockUserRepository, MockEmailService>,
}

fn harness(behavior: EmailBehavior, code: u32) -> Harness {
    let user = User::new("alice".to_string(), "a@b.com", "hash".to_string());
    let repo = Arc::new(MockUserRepository::with_users(vec![user]));
    let email = Arc::new(MockEmailService::new(behavior));
    let clock = Arc::new(ManualClock::default());
    let config = VerificationServiceConfig::new(SECRET, SENDER)
        .with_send_timeout(std::time::Duration::from_secs(2));

    let service = VerificationService::new(repo.clone(), email.clone(), config)
        .unwrap()
        .with_clock(clock.clone())
        .with_code_generator(Arc::new(FixedCodeGenerator(code)));

    Harness {
        repo,
        email,
        clock,
        service,
    }
}

async fn stored_user(repo: &MockUserRepository) -> User {
    repo.find_by_email("a@b.com").await.unwrap().unwrap()
}

#[tokio::test]
async fn test_generate_sends_code_and_stores_hash() {
    let h = harness(EmailBehavior::Accept, 482913);

    let result = h.service.request_verification_code("a@b.com").await.unwrap();

    let sent = h.email.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, SENDER);
    assert_eq!(sent[0].to, "a@b.com");
    assert_eq!(sent[0].subject, VERIFICATION_EMAIL_SUBJECT);
    assert_eq!(sent[0].html_body, "Your verification code is <b>482913</b>");
    assert_eq!(result.message_id.as_deref(), Some("mock-message-1"));

    let user = stored_user(&h.repo).await;
    let hasher = CodeHasher::new(SECRET.as_bytes()).unwrap();
    assert_eq!(user.verification_code_hash, Some(hasher.hash("482913")));
    assert_eq!(user.verification_issued_at, Some(result.issued_at));
    assert_eq!(result.expires_at - result.issued_at, Duration::minutes(5));
    assert!(!user.verified);
}

#[tokio::test]
async fn test_plaintext_code_is_never_stored() {
    let h = harness(EmailBehavior::Accept, 482913);
    h.service.request_verification_code("a@b.com").await.unwrap();

    let user = stored_user(&h.repo).await;
    let stored = user.verification_code_hash.unwrap();
    assert!(!stored.contains("482913"));
    assert_eq!(stored.len(), 64);
}

#[tokio::test]
async fn test_verify_with_emitted_code_then_already_verified() {
    let h = harness(EmailBehavior::Accept, 482913);
    h.service.request_verification_code("a@b.com").await.unwrap();
    let code = h.email.last_code().unwrap();
    assert_eq!(code, "482913");

    let result = h
        .service
        .confirm_verification_code("a@b.com", &code)
        .await
        .unwrap();
    assert_eq!(result, VerifyCodeResult::Verified);

    let user = stored_user(&h.repo).await;
    assert!(user.verified);
    assert!(user.verification_code_hash.is_none());
    assert!(user.verification_issued_at.is_none());

    let err = h
        .service
        .confirm_verification_code("a@b.com", &code)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::AlreadyVerified)
    ));
}

#[tokio::test]
async fn test_wrong_code_is_mismatch_and_leaves_code_pending() {
    let h = harness(EmailBehavior::Accept, 482913);
    h.service.request_verification_code("a@b.com").await.unwrap();
    let before = stored_user(&h.repo).await;
    let updates = h.repo.update_count();

    let result = h
        .service
        .confirm_verification_code("a@b.com", "482914")
        .await
        .unwrap();
    assert_eq!(result, VerifyCodeResult::Mismatch);

    let after = stored_user(&h.repo).await;
    assert_eq!(after.verification_code_hash, before.verification_code_hash);
    assert_eq!(after.verification_issued_at, before.verification_issued_at);
    assert!(!after.verified);
    assert_eq!(h.repo.update_count(), updates);

    // Retry with the right code still works
    let result = h
        .service
        .confirm_verification_code("a@b.com", "482913")
        .await
        .unwrap();
    assert!(result.is_verified());
}

#[tokio::test]
async fn test_expired_code_is_rejected_even_when_correct() {
    let h = harness(EmailBehavior::Accept, 111222);
    h.service.request_verification_code("a@b.com").await.unwrap();

    h.clock.advance(Duration::seconds(301));

    let err = h
        .service
        .confirm_verification_code("a@b.com", "111222")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::CodeExpired)
    ));

    // Expiry is lazy: the stale code stays until a new one is issued
    let user = stored_user(&h.repo).await;
    assert!(user.has_pending_code());
    assert!(!user.verified);
}

#[tokio::test]
async fn test_code_is_valid_at_exact_expiry_boundary() {
    let h = harness(EmailBehavior::Accept, 111222);
    h.service.request_verification_code("a@b.com").await.unwrap();

    h.clock.advance(Duration::milliseconds(300_000));

    let result = h
        .service
        .confirm_verification_code("a@b.com", "111222")
        .await
        .unwrap();
    assert_eq!(result, VerifyCodeResult::Verified);
}

#[tokio::test]
async fn test_code_expires_one_millisecond_past_boundary() {
    let h = harness(EmailBehavior::Accept, 111222);
    h.service.request_verification_code("a@b.com").await.unwrap();

    h.clock.advance(Duration::milliseconds(300_001));

    let err = h
        .service
        .confirm_verification_code("a@b.com", "111222")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::CodeExpired)
    ));
}

#[tokio::test]
async fn test_expiry_is_checked_before_code() {
    let h = harness(EmailBehavior::Accept, 111222);
    h.service.request_verification_code("a@b.com").await.unwrap();
    h.clock.advance(Duration::minutes(10));

    let err = h
        .service
        .confirm_verification_code("a@b.com", "not-a-code")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::CodeExpired)
    ));
}

#[tokio::test]
async fn test_validate_without_code_issued() {
    let h = harness(EmailBehavior::Accept, 482913);

    let err = h
        .service
        .confirm_verification_code("a@b.com", "482913")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::NoCodeIssued)
    ));
}

#[tokio::test]
async fn test_generate_for_verified_user_sends_nothing() {
    let h = harness(EmailBehavior::Accept, 482913);
    let mut user = stored_user(&h.repo).await;
    user.verified = true;
    h.repo.update(user).await.unwrap();
    let updates = h.repo.update_count();

    let err = h
        .service
        .request_verification_code("a@b.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::AlreadyVerified)
    ));
    assert!(h.email.sent_messages().is_empty());
    assert_eq!(h.repo.update_count(), updates);
}

#[tokio::test]
async fn test_regenerate_replaces_previous_code() {
    let h = harness(EmailBehavior::Accept, 482913);
    h.service.request_verification_code("a@b.com").await.unwrap();
    let first = stored_user(&h.repo).await;

    h.clock.advance(Duration::seconds(30));
    let service = VerificationService::new(
        h.repo.clone(),
        h.email.clone(),
        VerificationServiceConfig::new(SECRET, SENDER),
    )
    .unwrap()
    .with_clock(h.clock.clone())
    .with_code_generator(Arc::new(FixedCodeGenerator(654321)));
    service.request_verification_code("a@b.com").await.unwrap();

    let second = stored_user(&h.repo).await;
    assert_ne!(first.verification_code_hash, second.verification_code_hash);
    assert!(second.verification_issued_at > first.verification_issued_at);

    let result = service
        .confirm_verification_code("a@b.com", "482913")
        .await
        .unwrap();
    assert_eq!(result, VerifyCodeResult::Mismatch);

    let result = service
        .confirm_verification_code("a@b.com", "654321")
        .await
        .unwrap();
    assert_eq!(result, VerifyCodeResult::Verified);
}

#[tokio::test]
async fn test_canonical_forms_of_code_match() {
    let h = harness(EmailBehavior::Accept, 482913);
    h.service.request_verification_code("a@b.com").await.unwrap();

    let result = h
        .service
        .confirm_verification_code("a@b.com", " 0482913 ")
        .await
        .unwrap();
    assert_eq!(result, VerifyCodeResult::Verified);
}

#[tokio::test]
async fn test_non_numeric_code_is_mismatch() {
    let h = harness(EmailBehavior::Accept, 482913);
    h.service.request_verification_code("a@b.com").await.unwrap();

    for input in ["", "abcdef", "48291x", "-482913"] {
        let result = h
            .service
            .confirm_verification_code("a@b.com", input)
            .await
            .unwrap();
        assert_eq!(result, VerifyCodeResult::Mismatch, "input {:?}", input);
    }
}

#[tokio::test]
async fn test_code_is_bound_to_secret() {
    let h = harness(EmailBehavior::Accept, 482913);
    h.service.request_verification_code("a@b.com").await.unwrap();

    let other = VerificationService::new(
        h.repo.clone(),
        h.email.clone(),
        VerificationServiceConfig::new("another-secret", SENDER),
    )
    .unwrap()
    .with_clock(h.clock.clone());

    let result = other
        .confirm_verification_code("a@b.com", "482913")
        .await
        .unwrap();
    assert_eq!(result, VerifyCodeResult::Mismatch);
}

#[tokio::test]
async fn test_unknown_user() {
    let h = harness(EmailBehavior::Accept, 482913);

    let err = h
        .service
        .request_verification_code("nobody@b.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));

    let err = h
        .service
        .confirm_verification_code("nobody@b.com", "482913")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_lookup_normalizes_email() {
    let h = harness(EmailBehavior::Accept, 482913);

    assert!(h.service.request_verification_code("  A@B.com ").await.is_ok());
}

#[tokio::test]
async fn test_rejected_recipient_stores_nothing() {
    let h = harness(EmailBehavior::Reject, 482913);

    let err = h
        .service
        .request_verification_code("a@b.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::EmailRejected { .. })
    ));
    assert!(!stored_user(&h.repo).await.has_pending_code());
    assert_eq!(h.repo.update_count(), 0);
}

#[tokio::test]
async fn test_other_accepted_recipient_is_rejection() {
    let h = harness(EmailBehavior::AcceptOther("someone@else.com".to_string()), 482913);

    let err = h
        .service
        .request_verification_code("a@b.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::EmailRejected { .. })
    ));
    assert!(!stored_user(&h.repo).await.has_pending_code());
}

#[tokio::test]
async fn test_accepted_recipient_compared_case_insensitively() {
    let h = harness(EmailBehavior::AcceptOther("A@B.COM".to_string()), 482913);

    assert!(h.service.request_verification_code("a@b.com").await.is_ok());
    assert!(stored_user(&h.repo).await.has_pending_code());
}

#[tokio::test]
async fn test_transport_failure() {
    let h = harness(EmailBehavior::Fail("connection refused".to_string()), 482913);

    let err = h
        .service
        .request_verification_code("a@b.com")
        .await
        .unwrap_err();
    match err {
        DomainError::Verification(VerificationError::EmailTransport { message }) => {
            assert_eq!(message, "connection refused");
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
    assert!(!stored_user(&h.repo).await.has_pending_code());
}

#[tokio::test(start_paused = true)]
async fn test_send_timeout() {
    let h = harness(
        EmailBehavior::Delay(std::time::Duration::from_secs(60)),
        482913,
    );

    let err = h
        .service
        .request_verification_code("a@b.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::EmailTimeout { seconds: 2 })
    ));
    assert!(!stored_user(&h.repo).await.has_pending_code());
}

#[tokio::test]
async fn test_storage_failure_on_generate() {
    let h = harness(EmailBehavior::Accept, 482913);
    h.repo.set_fail_writes(true);

    let err = h
        .service
        .request_verification_code("a@b.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));
}

#[tokio::test]
async fn test_storage_failure_on_successful_validate() {
    let h = harness(EmailBehavior::Accept, 482913);
    h.service.request_verification_code("a@b.com").await.unwrap();
    h.repo.set_fail_writes(true);

    let err = h
        .service
        .confirm_verification_code("a@b.com", "482913")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));

    let user = stored_user(&h.repo).await;
    assert!(!user.verified);
    assert!(user.has_pending_code());
}
