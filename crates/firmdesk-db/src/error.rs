//! Database-specific error types and conversions.

use firmdesk_core::error::FirmError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record decode failed: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique constraint violated: {entity}.{field}")]
    Duplicate { entity: String, field: String },
}

impl From<DbError> for FirmError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => FirmError::NotFound { entity, id },
            DbError::Duplicate { entity, field } => FirmError::Duplicate { entity, field },
            other => FirmError::Database(other.to_string()),
        }
    }
}
