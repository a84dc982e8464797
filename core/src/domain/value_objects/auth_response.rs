//! Authentication response value object for API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::SessionToken;
use crate::domain::entities::user::User;

/// Result of a successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed session JWT
    pub token: String,

    /// Always `"Bearer"`
    pub token_type: String,

    /// Seconds until the token expires
    pub expires_in: i64,

    /// When the token expires
    pub expires_at: DateTime<Utc>,

    pub user_id: Uuid,

    pub email: String,

    /// Whether the account's email is verified
    pub verified: bool,
}

impl AuthResponse {
    /// Creates an authentication response from a session token and its user
    pub fn from_session(session: SessionToken, user: &User) -> Self {
        let expires_in = (session.expires_at - Utc::now()).num_seconds().max(0);
        Self {
            token: session.token,
            token_type: "Bearer".to_string(),
            expires_in,
            expires_at: session.expires_at,
            user_id: user.id,
            email: user.email.clone(),
            verified: user.verified,
        }
    }

    /// Value for the session cookie / `Authorization` header
    pub fn bearer_value(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}
