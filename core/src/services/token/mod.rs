//! Token service module for session JWT management
//!
//! Tokens are stateless HS256 JWTs; nothing is stored server-side, so a
//! token stays valid until it expires.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
