//! Request and response bodies for the HTTP API

pub mod auth;

pub use auth::*;
pub use mv_shared::{ApiResponse, ErrorResponse};
