//! Main authentication service implementation

use std::sync::Arc;

use mv_shared::utils::email::{mask_email, normalize_email};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::password::PasswordService;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Authentication service for registration and session management
pub struct AuthService<U: UserRepository> {
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Password hashing
    password_service: PasswordService,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for session token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            password_service: PasswordService::new(config.bcrypt_cost),
            token_service,
        }
    }

    /// Register a new account
    ///
    /// The email is trimmed and lowercased before the uniqueness check. New
    /// accounts start unverified with no pending code.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `Err(AuthError::UserAlreadyExists)` - Email or username is taken
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        let email = normalize_email(email);
        let username = username.trim();
        let masked = mask_email(&email);

        if self.user_repository.exists_by_email(&email).await? {
            tracing::info!(email = %masked, event = "signup_rejected", "Email already registered");
            return Err(AuthError::UserAlreadyExists {
                field: "email".to_string(),
            }
            .into());
        }

        if self.user_repository.exists_by_username(username).await? {
            tracing::info!(
                username = username,
                event = "signup_rejected",
                "Username already taken"
            );
            return Err(AuthError::UserAlreadyExists {
                field: "username".to_string(),
            }
            .into());
        }

        let password_hash = self.password_service.hash(password).await?;
        let user = User::new(username.to_string(), &email, password_hash);
        let user = self.user_repository.create(user).await?;

        tracing::info!(
            user_id = %user.id,
            email = %masked,
            event = "user_created",
            "New user registered"
        );

        Ok(user)
    }

    /// Authenticate with email and password
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Session token and user summary
    /// * `Err(AuthError::UserNotFound)` - No account with that email
    /// * `Err(AuthError::InvalidCredentials)` - Wrong password
    pub async fn signin(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);
        let masked = mask_email(&email);

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self
            .password_service
            .verify(password, &user.password_hash)
            .await?
        {
            tracing::warn!(
                email = %masked,
                event = "signin_failed",
                "Invalid password"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let session = self.token_service.generate_session_token(&user)?;

        tracing::info!(
            user_id = %user.id,
            email = %masked,
            verified = user.verified,
            event = "user_signed_in",
            "User signed in"
        );

        Ok(AuthResponse::from_session(session, &user))
    }

    /// End a session
    ///
    /// Session tokens are stateless, so this only requires that the caller
    /// presented one; the HTTP layer clears the cookie.
    pub async fn signout(&self, session_token: Option<&str>) -> DomainResult<()> {
        let token = match session_token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::NotSignedIn.into()),
        };

        match self.token_service.verify_session_token(token) {
            Ok(claims) => {
                tracing::info!(user_id = %claims.sub, event = "user_signed_out", "User signed out");
            }
            Err(e) => {
                tracing::debug!(error = %e, event = "user_signed_out", "Signed out with unreadable token");
            }
        }

        Ok(())
    }

    /// Decode and validate a session token
    pub fn verify_session_token(&self, token: &str) -> DomainResult<Claims> {
        self.token_service.verify_session_token(token)
    }
}
