//! Unit tests for user entity

use chrono::{Duration, Utc};

use crate::domain::entities::user::User;

fn sample_user() -> User {
    User::new(
        "alice".to_string(),
        "  Alice@Example.COM ",
        "$2b$12$hash".to_string(),
    )
}

#[test]
fn test_new_user_creation() {
    let user = sample_user();

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert!(!user.verified);
    assert!(user.verification_code_hash.is_none());
    assert!(user.verification_issued_at.is_none());
    assert!(!user.has_pending_code());
    assert_eq!(user.created_at, user.updated_at);
}

#[test]
fn test_issue_verification_code_sets_both_fields() {
    let mut user = sample_user();
    let issued_at = Utc::now();

    user.issue_verification_code("abc123".to_string(), issued_at);

    assert!(user.has_pending_code());
    assert_eq!(user.pending_code(), Some(("abc123", issued_at)));
    assert_eq!(user.updated_at, issued_at);
}

#[test]
fn test_reissue_overwrites_previous_code() {
    let mut user = sample_user();
    let first = Utc::now();
    let second = first + Duration::seconds(30);

    user.issue_verification_code("first".to_string(), first);
    user.issue_verification_code("second".to_string(), second);

    assert_eq!(user.pending_code(), Some(("second", second)));
}

#[test]
fn test_mark_verified_clears_pending_code() {
    let mut user = sample_user();
    let now = Utc::now();
    user.issue_verification_code("abc123".to_string(), now);

    user.mark_verified(now);

    assert!(user.verified);
    assert!(user.verification_code_hash.is_none());
    assert!(user.verification_issued_at.is_none());
    assert!(!user.has_pending_code());
}

#[test]
fn test_half_populated_code_is_not_pending() {
    let mut user = sample_user();
    user.verification_code_hash = Some("orphan".to_string());

    assert!(user.pending_code().is_none());
}

#[test]
fn test_serialization_hides_secrets() {
    let mut user = sample_user();
    user.issue_verification_code("abc123".to_string(), Utc::now());

    let json = serde_json::to_value(&user).unwrap();

    assert!(json.get("password_hash").is_none());
    assert!(json.get("verification_code_hash").is_none());
    assert!(json.get("verification_issued_at").is_none());
    assert_eq!(json["email"], "alice@example.com");
}
