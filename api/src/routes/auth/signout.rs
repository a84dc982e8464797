use actix_web::{web, HttpResponse};

use crate::handlers::error::handle_domain_error;
use crate::middleware::session::{removal_cookie, SessionCookie};

use mv_core::repositories::UserRepository;
use mv_core::services::verification::EmailServiceTrait;
use mv_shared::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/signout
///
/// Requires a session cookie (or `Authorization` header). Sessions are
/// stateless, so signing out only clears the cookie on the client.
///
/// # Response
///
/// - 200 OK: `{ "success": true, "message": "User disconnected" }`
/// - 401 Unauthorized: no session presented
pub async fn signout<U, E>(
    state: web::Data<AppState<U, E>>,
    session: SessionCookie,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    match state.auth_service.signout(session.token()).await {
        Ok(()) => HttpResponse::Ok()
            .cookie(removal_cookie(&state.session))
            .json(ApiResponse::message("User disconnected")),
        Err(error) => handle_domain_error(&error),
    }
}
