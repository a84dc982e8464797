//! Authentication service module
//!
//! This module provides account management:
//! - Registration with bcrypt-hashed passwords
//! - Sign-in issuing a session JWT
//! - Sign-out and session token checks

mod config;
mod service;


pub use config::AuthServiceConfig;
pub use service::AuthService;
