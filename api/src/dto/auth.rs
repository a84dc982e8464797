use mv_shared::utils::email::has_allowed_tld;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Passwords are plain alphanumerics
static PASSWORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]{3,30}$").expect("password regex is valid"));

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 30, message = "\"username\" must be between 3 and 30 characters"))]
    #[serde(default)]
    pub username: String,
    #[validate(
        length(min = 6, max = 30, message = "\"email\" must be between 6 and 30 characters"),
        email(message = "\"email\" must be a valid email"),
        custom(function = "validate_allowed_tld")
    )]
    #[serde(default)]
    pub email: String,
    #[validate(
        length(min = 6, message = "\"password\" length must be at least 6 characters long"),
        custom(function = "validate_password_pattern")
    )]
    #[serde(default)]
    pub password: String,
}

impl SignupRequest {
    pub const FIELD_ORDER: [&'static str; 3] = ["username", "email", "password"];
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(
        length(min = 6, max = 30, message = "\"email\" must be between 6 and 30 characters"),
        email(message = "\"email\" must be a valid email"),
        custom(function = "validate_allowed_tld")
    )]
    #[serde(default)]
    pub email: String,
    #[validate(
        length(min = 6, message = "\"password\" length must be at least 6 characters long"),
        custom(function = "validate_password_pattern")
    )]
    #[serde(default)]
    pub password: String,
}

impl SigninRequest {
    pub const FIELD_ORDER: [&'static str; 2] = ["email", "password"];
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    #[validate(email(message = "\"email\" must be a valid email"))]
    #[serde(default)]
    pub email: String,
}

impl SendCodeRequest {
    pub const FIELD_ORDER: [&'static str; 1] = ["email"];
}

/// A submitted code may arrive as a JSON number or as a string
///
/// Whole-valued floats (`820177.0`, `8.20177e5`) are the same number as
/// their integer form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProvidedCode {
    Number(i64),
    Float(f64),
    Text(String),
}

impl ProvidedCode {
    /// The code as a digit string, before canonicalization
    pub fn as_code_string(&self) -> String {
        match self {
            ProvidedCode::Number(n) => n.to_string(),
            ProvidedCode::Float(f) => whole_number(*f).unwrap_or_else(|| f.to_string()),
            ProvidedCode::Text(s) => {
                let trimmed = s.trim();
                let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
                if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                    return s.clone();
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(whole_number)
                    .unwrap_or_else(|| s.clone())
            }
        }
    }
}

/// Integer rendering of a float with no fractional part
fn whole_number(value: f64) -> Option<String> {
    // Beyond 2^53 the float no longer names a single integer
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

    if value.is_finite() && value.fract() == 0.0 && value.abs() < EXACT_LIMIT {
        Some(format!("{}", value as i64))
    } else {
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    #[validate(
        length(min = 6, max = 30, message = "\"email\" must be between 6 and 30 characters"),
        email(message = "\"email\" must be a valid email"),
        custom(function = "validate_allowed_tld")
    )]
    #[serde(default)]
    pub email: String,
    #[validate(
        required(message = "\"providedCode\" is required"),
        custom(function = "validate_provided_code")
    )]
    #[serde(default, alias = "provided_code")]
    pub provided_code: Option<ProvidedCode>,
}

impl VerifyCodeRequest {
    pub const FIELD_ORDER: [&'static str; 2] = ["email", "provided_code"];
}

/// Returned by `/signin` alongside the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_id: String,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    /// Seconds the code stays valid
    pub expires_in: i64,
}

fn validate_allowed_tld(email: &str) -> Result<(), ValidationError> {
    if has_allowed_tld(email) {
        return Ok(());
    }
    let mut error = ValidationError::new("email_tld");
    error.message = Some("\"email\" must be a valid email".into());
    Err(error)
}

fn validate_password_pattern(password: &str) -> Result<(), ValidationError> {
    if PASSWORD_REGEX.is_match(password) {
        return Ok(());
    }
    let mut error = ValidationError::new("password_pattern");
    error.message = Some(
        "\"password\" with value fails to match the required pattern: /^[a-zA-Z0-9]{3,30}$/".into(),
    );
    Err(error)
}

fn validate_provided_code(code: &ProvidedCode) -> Result<(), ValidationError> {
    let is_number = match code {
        ProvidedCode::Number(_) => true,
        ProvidedCode::Float(f) => f.is_finite(),
        ProvidedCode::Text(s) => s.trim().parse::<f64>().is_ok(),
    };
    if is_number {
        return Ok(());
    }
    let mut error = ValidationError::new("provided_code");
    error.message = Some("\"providedCode\" must be a number".into());
    Err(error)
}

/// First failing message, walking fields in declaration order
///
/// `ValidationErrors` keeps fields in a hash map, so the caller passes the
/// order in which fields should be reported.
pub fn first_validation_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    field_order
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .chain(field_errors.values())
        .flat_map(|errors| errors.iter())
        .next()
        .map(|error| {
            error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string())
        })
        .unwrap_or_else(|| "Invalid request".to_string())
}
