//! Error types for authentication, session tokens and email verification

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists: {field} is taken")]
    UserAlreadyExists { field: String },

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("You are not signed in")]
    NotSignedIn,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Email verification-code errors
///
/// A wrong code is not an error; see `VerifyCodeResult::Mismatch`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Account already verified")]
    AlreadyVerified,

    #[error("Email provider did not accept {recipient}")]
    EmailRejected { recipient: String },

    #[error("Email transport failure: {message}")]
    EmailTransport { message: String },

    #[error("Email send timed out after {seconds}s")]
    EmailTimeout { seconds: u64 },

    #[error("No code sent")]
    NoCodeIssued,

    #[error("Code Expired")]
    CodeExpired,
}
