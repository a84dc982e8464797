//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{Claims, SessionToken, JWT_ISSUER, SESSION_EXPIRY_HOURS};
pub use user::User;
pub use verification_code::{
    VerificationCode, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRY_MS,
};
