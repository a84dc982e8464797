//! Shared fixtures for the HTTP route tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{test, web};
use serde_json::Value;

use mv_api::AppState;
use mv_core::repositories::MockUserRepository;
use mv_core::services::auth::{AuthService, AuthServiceConfig};
use mv_core::services::token::{TokenService, TokenServiceConfig};
use mv_core::services::verification::{
    ManualClock, VerificationService, VerificationServiceConfig,
};
use mv_infra::email::MockEmailService;
use mv_shared::config::AppConfig;

pub type TestState = AppState<MockUserRepository, MockEmailService>;

pub const EMAIL: &str = "alice@example.com";
pub const PASSWORD: &str = "secret123";

/// Services backed by in-memory seams, plus handles to steer them
pub struct TestContext {
    pub config: AppConfig,
    pub users: Arc<MockUserRepository>,
    pub email: MockEmailService,
    pub clock: Arc<ManualClock>,
    pub state: web::Data<TestState>,
}

impl TestContext {
    pub fn new() -> Self {
        let config = AppConfig::default();
        let users = Arc::new(MockUserRepository::new());
        let email = MockEmailService::new();
        let clock = Arc::new(ManualClock::default());

        let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(
            &config.auth.jwt,
        )));
        // Minimum bcrypt cost keeps the tests fast
        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            token_service,
            AuthServiceConfig { bcrypt_cost: 4 },
        ));
        let verification_service = Arc::new(
            VerificationService::new(
                users.clone(),
                Arc::new(email.clone()),
                VerificationServiceConfig::new("test-hmac-secret", "codes@mailverify.test"),
            )
            .expect("verification service")
            .with_clock(clock.clone()),
        );

        let state = web::Data::new(AppState::new(
            auth_service,
            verification_service,
            config.auth.session.clone(),
        ));

        Self {
            config,
            users,
            email,
            clock,
            state,
        }
    }
}

pub fn post_json(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

pub fn signup_body(username: &str, email: &str, password: &str) -> Value {
    serde_json::json!({ "username": username, "email": email, "password": password })
}
