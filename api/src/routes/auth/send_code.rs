use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{first_validation_message, SendCodeRequest, SendCodeResponse};
use crate::handlers::error::{handle_domain_error, validation_error};

use mv_core::repositories::UserRepository;
use mv_core::services::verification::EmailServiceTrait;
use mv_shared::{utils::email::mask_email, ApiResponse};

use super::AppState;

/// Handler for POST /api/v1/auth/send-verification-code
///
/// Emails a fresh six-digit code to the account and replaces any pending one.
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com" }
/// ```
///
/// # Response
///
/// - 200 OK: `{ "success": true, "message": "Verification code sent", "expires_in": 300 }`
/// - 400 Bad Request: invalid body, account already verified, or the
///   provider did not accept the recipient
/// - 404 Not Found: no such account
/// - 502 Bad Gateway: the email provider failed or timed out
pub async fn send_verification_code<U, E>(
    state: web::Data<AppState<U, E>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error(
            StatusCode::BAD_REQUEST,
            first_validation_message(&errors, &SendCodeRequest::FIELD_ORDER),
        );
    }

    log::info!(
        "Processing send-verification-code for {}",
        mask_email(&request.email)
    );

    match state
        .verification_service
        .request_verification_code(&request.email)
        .await
    {
        Ok(result) => {
            let expires_in = (result.expires_at - result.issued_at).num_seconds();
            HttpResponse::Ok().json(ApiResponse::success(
                "Verification code sent",
                SendCodeResponse { expires_in },
            ))
        }
        Err(error) => handle_domain_error(&error),
    }
}
