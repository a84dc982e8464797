//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{
    Claims, SessionToken, User, VerificationCode, CODE_LENGTH, CODE_MAX, CODE_MIN,
    DEFAULT_EXPIRY_MS, JWT_ISSUER, SESSION_EXPIRY_HOURS,
};
pub use value_objects::AuthResponse;
