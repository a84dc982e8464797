//! Main token service implementation

use chrono::{TimeZone, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, SessionToken};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and checking session JWTs
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a session token for a user
    ///
    /// # Returns
    ///
    /// * `Ok(SessionToken)` - The signed token and its expiry
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn generate_session_token(&self, user: &User) -> Result<SessionToken, DomainError> {
        let claims = Claims::for_user(user, &self.config.issuer, self.config.session_expiry_hours);

        let token = encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign session token");
                DomainError::Token(TokenError::TokenGenerationFailed)
            })?;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(SessionToken { token, expires_at })
    }

    /// Verifies a session token
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is invalid, expired, or malformed
    pub fn verify_session_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                if e.kind() == &ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::TokenExpired)
                } else {
                    DomainError::Token(TokenError::InvalidToken)
                }
            })?;

        Ok(token_data.claims)
    }

    /// Session lifetime in hours
    pub fn session_expiry_hours(&self) -> i64 {
        self.config.session_expiry_hours
    }
}
