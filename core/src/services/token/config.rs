//! Configuration for the token service

use jsonwebtoken::Algorithm;
use mv_shared::config::JwtConfig;

use crate::domain::entities::token::{JWT_ISSUER, SESSION_EXPIRY_HOURS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Session token expiry in hours
    pub session_expiry_hours: i64,
    /// Value of the `iss` claim
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            session_expiry_hours: SESSION_EXPIRY_HOURS,
            issuer: JWT_ISSUER.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            session_expiry_hours: config.expiry_hours,
            issuer: config.issuer.clone(),
        }
    }
}
