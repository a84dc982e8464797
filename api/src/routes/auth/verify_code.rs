use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{first_validation_message, VerifyCodeRequest};
use crate::handlers::error::{code_mismatch, handle_domain_error, validation_error};

use mv_core::repositories::UserRepository;
use mv_core::services::verification::{EmailServiceTrait, VerifyCodeResult};
use mv_shared::{utils::email::mask_email, ApiResponse};

use super::AppState;

/// Handler for POST /api/v1/auth/verify-verification-code
///
/// # Request Body
///
/// `providedCode` may be a JSON number or a numeric string.
///
/// ```json
/// { "email": "alice@example.com", "providedCode": 482913 }
/// ```
///
/// # Response
///
/// - 200 OK: `{ "success": true, "message": "Account verified" }`
/// - 400 Bad Request: already verified, no code sent, code expired, or
///   wrong code
/// - 401 Unauthorized: body failed validation
/// - 404 Not Found: no such account
pub async fn verify_verification_code<U, E>(
    state: web::Data<AppState<U, E>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error(
            StatusCode::UNAUTHORIZED,
            first_validation_message(&errors, &VerifyCodeRequest::FIELD_ORDER),
        );
    }

    let provided_code = match request.provided_code {
        Some(code) => code.as_code_string(),
        None => {
            return validation_error(StatusCode::UNAUTHORIZED, "\"providedCode\" is required")
        }
    };

    match state
        .verification_service
        .confirm_verification_code(&request.email, &provided_code)
        .await
    {
        Ok(VerifyCodeResult::Verified) => {
            log::info!("Account verified: {}", mask_email(&request.email));
            HttpResponse::Ok().json(ApiResponse::message("Account verified"))
        }
        Ok(VerifyCodeResult::Mismatch) => {
            log::warn!("Wrong verification code for {}", mask_email(&request.email));
            code_mismatch()
        }
        Err(error) => handle_domain_error(&error),
    }
}
