//! Password hashing with bcrypt

mod service;

pub use service::{PasswordService, DEFAULT_BCRYPT_COST};
