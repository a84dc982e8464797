//! CORS middleware configuration for cross-origin requests.
//!
//! Browsers calling the API carry the session cookie, so credentials are
//! supported in both modes. A restrictive configuration only admits the
//! origins listed in `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use mv_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    if config.restrictive {
        create_restrictive_cors(config)
    } else {
        create_permissive_cors(config)
    }
}

/// Any origin may call the API; used outside production.
fn create_permissive_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring permissive CORS");

    let cors = base_cors(config).allow_any_origin();
    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}

/// Only configured origins may call the API.
fn create_restrictive_cors(config: &CorsConfig) -> Cors {
    log::info!(
        "Configuring restrictive CORS for {} origin(s)",
        config.allowed_origins.len()
    );

    if config.allowed_origins.is_empty() {
        log::warn!("ALLOWED_ORIGINS is empty; cross-origin requests will be refused");
    }

    let cors = config
        .allowed_origins
        .iter()
        .fold(base_cors(config), |cors, origin| cors.allowed_origin(origin));

    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}

fn base_cors(config: &CorsConfig) -> Cors {
    Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(config.max_age)
}
