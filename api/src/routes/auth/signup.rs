use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{first_validation_message, SignupRequest, SignupResponse};
use crate::handlers::error::{handle_domain_error, validation_error};

use mv_core::repositories::UserRepository;
use mv_core::services::verification::EmailServiceTrait;
use mv_shared::{utils::email::mask_email, ApiResponse};

use super::AppState;

/// Handler for POST /api/v1/auth/signup
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "email": "alice@example.com", "password": "secret123" }
/// ```
///
/// # Response
///
/// - 201 Created: `{ "success": true, "message": "User created", ... }`
/// - 400 Bad Request: body failed validation
/// - 409 Conflict: email or username already registered
pub async fn signup<U, E>(
    state: web::Data<AppState<U, E>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error(
            StatusCode::BAD_REQUEST,
            first_validation_message(&errors, &SignupRequest::FIELD_ORDER),
        );
    }

    log::info!("Processing signup for {}", mask_email(&request.email));

    match state
        .auth_service
        .signup(&request.username, &request.email, &request.password)
        .await
    {
        Ok(user) => HttpResponse::Created().json(ApiResponse::success(
            "User created",
            SignupResponse {
                user_id: user.id.to_string(),
                username: user.username,
                email: user.email,
            },
        )),
        Err(error) => handle_domain_error(&error),
    }
}
