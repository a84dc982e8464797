//! Authentication route handlers
//!
//! - Account creation and password sign-in
//! - Sign-out (clears the session cookie)
//! - Email verification (sending and confirming codes)

pub mod send_code;
pub mod signin;
pub mod signout;
pub mod signup;
pub mod verify_code;

use std::sync::Arc;

use actix_web::{http::StatusCode, web};
use mv_core::repositories::UserRepository;
use mv_core::services::auth::AuthService;
use mv_core::services::verification::{EmailServiceTrait, VerificationService};
use mv_shared::config::SessionConfig;

use crate::handlers::BodyErrorStatus;

pub use send_code::send_verification_code;
pub use signin::signin;
pub use signout::signout;
pub use signup::signup;
pub use verify_code::verify_verification_code;

/// Application state that holds shared services
pub struct AppState<U, E>
where
    U: UserRepository,
    E: EmailServiceTrait + ?Sized,
{
    pub auth_service: Arc<AuthService<U>>,
    pub verification_service: Arc<VerificationService<U, E>>,
    pub session: SessionConfig,
}

impl<U, E> AppState<U, E>
where
    U: UserRepository,
    E: EmailServiceTrait + ?Sized,
{
    pub fn new(
        auth_service: Arc<AuthService<U>>,
        verification_service: Arc<VerificationService<U, E>>,
        session: SessionConfig,
    ) -> Self {
        Self {
            auth_service,
            verification_service,
            session,
        }
    }
}

/// Register the `/auth` routes on a scope
pub fn configure<U, E>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup::<U, E>))
            .service(
                web::resource("/signin")
                    .app_data(BodyErrorStatus(StatusCode::UNAUTHORIZED))
                    .route(web::post().to(signin::<U, E>)),
            )
            .route("/signout", web::post().to(signout::<U, E>))
            .route(
                "/send-verification-code",
                web::post().to(send_verification_code::<U, E>),
            )
            .service(
                web::resource("/verify-verification-code")
                    .app_data(BodyErrorStatus(StatusCode::UNAUTHORIZED))
                    .route(web::post().to(verify_verification_code::<U, E>)),
            ),
    );
}
