//! HTTP API for the MailVerify backend
//!
//! Exposes account signup, password sign-in with a session cookie, and
//! email verification codes under `/api/v1/auth`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::auth::AppState;
