use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{first_validation_message, SigninRequest, SigninResponse};
use crate::handlers::error::{error_response, handle_domain_error, user_message, validation_error};
use crate::middleware::session::session_cookie;

use mv_core::errors::{AuthError, DomainError};
use mv_core::repositories::UserRepository;
use mv_core::services::verification::EmailServiceTrait;
use mv_shared::{utils::email::mask_email, ApiResponse};

use super::AppState;

/// Handler for POST /api/v1/auth/signin
///
/// On success the session JWT is returned in the body and set as the
/// `Authorization` cookie (`Bearer <jwt>`).
///
/// # Response
///
/// - 200 OK: `{ "success": true, "message": "User connected", "token": ... }`
/// - 401 Unauthorized: invalid body, unknown email or wrong password
pub async fn signin<U, E>(
    state: web::Data<AppState<U, E>>,
    request: web::Json<SigninRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error(
            StatusCode::UNAUTHORIZED,
            first_validation_message(&errors, &SigninRequest::FIELD_ORDER),
        );
    }

    match state
        .auth_service
        .signin(&request.email, &request.password)
        .await
    {
        Ok(auth) => {
            log::info!("User signed in: {}", mask_email(&auth.email));

            let cookie = session_cookie(&state.session, auth.bearer_value());
            let body = SigninResponse {
                token: auth.token,
                token_type: auth.token_type,
                expires_in: auth.expires_in,
                user_id: auth.user_id.to_string(),
                verified: auth.verified,
            };

            HttpResponse::Ok()
                .cookie(cookie)
                .json(ApiResponse::success("User connected", body))
        }
        // Unknown accounts answer 401 here rather than 404
        Err(error @ DomainError::Auth(AuthError::UserNotFound)) => {
            log::warn!("Sign-in for unknown account {}", mask_email(&request.email));
            error_response(StatusCode::UNAUTHORIZED, error.error_code(), user_message(&error))
        }
        Err(error) => handle_domain_error(&error),
    }
}
