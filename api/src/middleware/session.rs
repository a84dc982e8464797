//! Session token extraction.
//!
//! The session travels in the `Authorization` cookie as `Bearer <jwt>`.
//! Clients that cannot keep cookies may send the same value in the
//! `Authorization` header instead.

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    dev::Payload,
    http::header::AUTHORIZATION,
    web, FromRequest, HttpRequest,
};
use mv_shared::config::SessionConfig;
use std::future::{ready, Ready};

const BEARER_PREFIX: &str = "Bearer ";

/// Session token presented with the request, if any
///
/// Extraction never fails; handlers decide what a missing session means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie(pub Option<String>);

impl SessionCookie {
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for SessionCookie {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let cookie_name = session_config(req).cookie_name;
        ready(Ok(SessionCookie(extract_session_token(req, &cookie_name))))
    }
}

/// Session settings registered on the app, or the defaults
pub fn session_config(req: &HttpRequest) -> SessionConfig {
    req.app_data::<web::Data<SessionConfig>>()
        .map(|config| config.get_ref().clone())
        .unwrap_or_default()
}

/// Token from the session cookie, falling back to the `Authorization` header
pub fn extract_session_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    let from_cookie = req
        .cookie(cookie_name)
        .map(|cookie| strip_bearer(cookie.value()));

    let raw = from_cookie.or_else(|| {
        req.headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(strip_bearer)
    })?;

    let token = raw.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn strip_bearer(value: &str) -> String {
    let value = value.trim();
    value.strip_prefix(BEARER_PREFIX).unwrap_or(value).to_string()
}

/// Cookie carrying a freshly issued session
pub fn session_cookie(config: &SessionConfig, bearer_value: String) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), bearer_value)
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(config.cookie_max_age))
        .finish()
}

/// Cookie that instructs the client to drop the session
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .finish();
    cookie.make_removal();
    cookie
}
