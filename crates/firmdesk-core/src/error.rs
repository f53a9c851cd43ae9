//! Error types for the firmdesk system.

use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum FirmError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Duplicate {entity}: {field} is already taken")]
    Duplicate { entity: String, field: String },

    #[error("Access denied: {reason}")]
    Forbidden { reason: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Mail delivery failed: {0}")]
    Mail(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type FirmResult<T> = Result<T, FirmError>;

impl From<FieldErrors> for FirmError {
    fn from(errors: FieldErrors) -> Self {
        FirmError::Validation(errors)
    }
}
