use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use mv_core::errors::{AuthError, DomainError, TokenError, VerificationError};
use mv_shared::{error_codes, ErrorResponse};

/// Message returned for any server-side fault
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Message returned when a request body is not valid JSON for the route
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Storage { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Auth(err) => match err {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UserAlreadyExists { .. } => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::NotSignedIn => StatusCode::UNAUTHORIZED,
        },
        DomainError::Token(err) => match err {
            TokenError::TokenExpired | TokenError::InvalidToken => StatusCode::UNAUTHORIZED,
            TokenError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        },
        DomainError::Verification(err) => match err {
            VerificationError::AlreadyVerified
            | VerificationError::EmailRejected { .. }
            | VerificationError::NoCodeIssued
            | VerificationError::CodeExpired => StatusCode::BAD_REQUEST,
            VerificationError::EmailTransport { .. } | VerificationError::EmailTimeout { .. } => {
                StatusCode::BAD_GATEWAY
            }
        },
    }
}

/// Client-facing message for a domain error
///
/// Server faults never leak their internal message.
pub fn user_message(error: &DomainError) -> String {
    match error {
        DomainError::Storage { .. } | DomainError::Internal { .. } => {
            INTERNAL_ERROR_MESSAGE.to_string()
        }
        DomainError::Auth(AuthError::UserNotFound) => "User does not exist".to_string(),
        DomainError::Auth(AuthError::UserAlreadyExists { field }) => {
            format!("User already exists: {} is taken", field)
        }
        DomainError::Auth(AuthError::NotSignedIn) => "User not logged in".to_string(),
        DomainError::Token(TokenError::TokenGenerationFailed) => INTERNAL_ERROR_MESSAGE.to_string(),
        DomainError::Verification(VerificationError::AlreadyVerified) => {
            "You are already verified".to_string()
        }
        DomainError::Verification(VerificationError::EmailRejected { .. }) => {
            "Sending code failed".to_string()
        }
        DomainError::Verification(
            VerificationError::EmailTransport { .. } | VerificationError::EmailTimeout { .. },
        ) => "Email service is temporarily unavailable".to_string(),
        other => other.to_string(),
    }
}

/// Build an error response with an explicit status
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// Convert a domain error into an HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        log::error!("Domain Error: {:?}", error);
    } else {
        log::warn!("Request rejected: {}", error);
    }

    error_response(status, error.error_code(), user_message(error))
}

/// Request-body validation failure
///
/// The status differs per route (signup answers 400, signin and code
/// confirmation answer 401).
pub fn validation_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    let message = message.into();
    log::warn!("Validation failed: {}", message);
    error_response(status, error_codes::VALIDATION_ERROR, message)
}

/// The submitted code did not match the pending one
pub fn code_mismatch() -> HttpResponse {
    error_response(
        StatusCode::BAD_REQUEST,
        error_codes::CODE_MISMATCH,
        "Invalid verification code",
    )
}

/// Status a route answers when its JSON body cannot be read
///
/// Registered as resource data; routes without one answer 400.
#[derive(Debug, Clone, Copy)]
pub struct BodyErrorStatus(pub StatusCode);

/// `JsonConfig` error handler: malformed bodies get the JSON error envelope
///
/// Parser details stay in the log.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body on {}: {}", req.path(), err);

    let response = match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                error_codes::VALIDATION_ERROR,
                "Request body is too large",
            )
        }
        _ => {
            let status = req
                .app_data::<BodyErrorStatus>()
                .map(|status| status.0)
                .unwrap_or(StatusCode::BAD_REQUEST);
            error_response(status, error_codes::VALIDATION_ERROR, INVALID_BODY_MESSAGE)
        }
    };
    actix_web::error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_statuses() {
        assert_eq!(
            status_for(&VerificationError::CodeExpired.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&VerificationError::EmailTimeout { seconds: 10 }.into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&AuthError::UserAlreadyExists { field: "email".into() }.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(status_for(&DomainError::storage("down")), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_message_is_not_leaked() {
        let error = DomainError::storage("connection refused on 10.0.0.3");
        assert_eq!(user_message(&error), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_messages_match_client_contract() {
        assert_eq!(user_message(&VerificationError::NoCodeIssued.into()), "No code sent");
        assert_eq!(user_message(&VerificationError::CodeExpired.into()), "Code Expired");
        assert_eq!(user_message(&AuthError::InvalidCredentials.into()), "Invalid password");
        assert_eq!(user_message(&AuthError::UserNotFound.into()), "User does not exist");
    }
}
