//! Shared utilities and common types for the MailVerify server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error types and response structures
//! - Utility functions (email normalization, masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, Environment, JwtConfig, ServerConfig,
    SessionConfig, VerificationConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse};
pub use types::ApiResponse;
pub use utils::email;
