//! Authentication error types.

use firmdesk_core::error::FirmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session has expired")]
    SessionExpired,

    #[error("reset token has expired")]
    TokenExpired,

    #[error("invalid or already used token")]
    TokenInvalid,

    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error("mail delivery failed: {0}")]
    Mail(String),
}

impl From<AuthError> for FirmError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::SessionExpired
            | AuthError::TokenExpired
            | AuthError::TokenInvalid => FirmError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => FirmError::Internal(msg),
            AuthError::Mail(msg) => FirmError::Mail(msg),
        }
    }
}
