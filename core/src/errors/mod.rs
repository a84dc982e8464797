//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{AuthError, TokenError, VerificationError};

use mv_shared::errors::error_codes;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A read or write against user storage failed
    #[error("Storage failure: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Wrap any storage-layer error
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }

    /// Stable machine-readable code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => error_codes::VALIDATION_ERROR,
            Self::NotFound { .. } => error_codes::NOT_FOUND,
            Self::Storage { .. } => error_codes::STORAGE_FAILURE,
            Self::Internal { .. } => error_codes::INTERNAL_ERROR,
            Self::Auth(err) => match err {
                AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
                AuthError::UserAlreadyExists { .. } => error_codes::USER_ALREADY_EXISTS,
                AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                AuthError::NotSignedIn => error_codes::NOT_SIGNED_IN,
            },
            Self::Token(err) => match err {
                TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
                TokenError::InvalidToken | TokenError::TokenGenerationFailed => {
                    error_codes::TOKEN_INVALID
                }
            },
            Self::Verification(err) => match err {
                VerificationError::AlreadyVerified => error_codes::ALREADY_VERIFIED,
                VerificationError::EmailRejected { .. } => error_codes::EMAIL_REJECTED,
                VerificationError::EmailTransport { .. }
                | VerificationError::EmailTimeout { .. } => error_codes::EMAIL_TRANSPORT_ERROR,
                VerificationError::NoCodeIssued => error_codes::NO_CODE_ISSUED,
                VerificationError::CodeExpired => error_codes::CODE_EXPIRED,
            },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
