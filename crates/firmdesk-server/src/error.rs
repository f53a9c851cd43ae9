//! Mapping from domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use firmdesk_core::error::FirmError;
use firmdesk_core::validation::FieldError;
use serde::Serialize;
use tracing::error;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Wrapper so handlers can `?` domain errors straight into responses.
#[derive(Debug)]
pub struct ApiError(pub FirmError);

impl From<FirmError> for ApiError {
    fn from(err: FirmError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            FirmError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "validation failed".into(),
                    details: Some(errors.errors().to_vec()),
                },
            ),
            FirmError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: format!("{entity} {id} not found"),
                    details: None,
                },
            ),
            FirmError::Forbidden { reason } => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    error: reason,
                    details: None,
                },
            ),
            FirmError::AuthenticationFailed { reason } => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: reason,
                    details: None,
                },
            ),
            FirmError::Duplicate { entity, field } => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: format!("{entity} with this {field} already exists"),
                    details: None,
                },
            ),
            other => {
                error!(error = %other, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "internal server error".into(),
                        details: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
