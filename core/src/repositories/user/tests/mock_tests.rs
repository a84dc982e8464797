//! Unit tests for mock user repository

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(username: &str, email: &str) -> User {
    User::new(username.to_string(), email, "hash".to_string())
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();
    let alice = user("alice", "alice@example.com");

    let created = repo.create(alice.clone()).await.unwrap();
    assert_eq!(created.id, alice.id);

    let by_id = repo.find_by_id(alice.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.id), Some(alice.id));

    let by_email = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(alice.id));

    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_mock_repository_rejects_duplicates() {
    let repo = MockUserRepository::new();
    repo.create(user("alice", "alice@example.com")).await.unwrap();

    let err = repo
        .create(user("alice2", "alice@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::UserAlreadyExists { ref field }) if field == "email"
    ));

    let err = repo
        .create(user("alice", "other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::UserAlreadyExists { ref field }) if field == "username"
    ));
}

#[tokio::test]
async fn test_mock_repository_update() {
    let repo = MockUserRepository::new();
    let mut alice = repo.create(user("alice", "alice@example.com")).await.unwrap();

    alice.verified = true;
    repo.update(alice.clone()).await.unwrap();

    let stored = repo.find_by_id(alice.id).await.unwrap().unwrap();
    assert!(stored.verified);
    assert_eq!(repo.update_count(), 1);
}

#[tokio::test]
async fn test_mock_repository_update_missing_user() {
    let repo = MockUserRepository::new();
    let err = repo.update(user("ghost", "ghost@example.com")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(repo.update_count(), 0);
}

#[tokio::test]
async fn test_mock_repository_simulated_write_failure() {
    let alice = user("alice", "alice@example.com");
    let repo = MockUserRepository::with_users(vec![alice.clone()]);
    repo.set_fail_writes(true);

    let err = repo.update(alice.clone()).await.unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));

    repo.set_fail_writes(false);
    assert!(repo.update(alice).await.is_ok());
}

#[tokio::test]
async fn test_mock_repository_exists_checks() {
    let repo = MockUserRepository::with_users(vec![user("alice", "alice@example.com")]);

    assert!(repo.exists_by_email("alice@example.com").await.unwrap());
    assert!(!repo.exists_by_email("bob@example.com").await.unwrap());
    assert!(repo.exists_by_username("alice").await.unwrap());
    assert!(!repo.exists_by_username("bob").await.unwrap());
}
