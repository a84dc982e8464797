//! Business services containing domain logic and use cases.

pub mod auth;
pub mod password;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use password::PasswordService;
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{
    Clock, CodeGenerator, EmailMessage, EmailReceipt, EmailServiceTrait, SendCodeResult,
    VerificationService, VerificationServiceConfig, VerifyCodeResult,
};
