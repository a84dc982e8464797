//! Session token claims for JWT-based sign-in.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Session token lifetime (12 hours)
pub const SESSION_EXPIRY_HOURS: i64 = 12;

/// JWT issuer
pub const JWT_ISSUER: &str = "mailverify";

/// Claims structure for the session JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email address of the signed-in user
    pub email: String,

    /// Whether the email was verified when the token was issued
    pub verified: bool,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates session claims for a user
    pub fn for_user(user: &User, issuer: &str, expiry_hours: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::hours(expiry_hours);

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            verified: user.verified,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Parses the subject back into a user ID
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// A signed session token and its expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Encoded JWT
    pub token: String,

    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}
