//! SurrealDB repository implementations.

mod category;
mod client;
mod courier;
mod feedback;
mod order;
mod password_reset;
mod payment;
mod product;
mod session;
mod status;
mod user;

pub use category::SurrealCategoryRepository;
pub use client::SurrealClientRepository;
pub use courier::SurrealCourierRepository;
pub use feedback::SurrealFeedbackRepository;
pub use order::SurrealOrderRepository;
pub use password_reset::SurrealPasswordResetRepository;
pub use payment::SurrealPaymentRepository;
pub use product::SurrealProductRepository;
pub use session::SurrealSessionRepository;
pub use status::SurrealStatusRepository;
pub use user::{SurrealUserRepository, verify_password};

use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// Parse a stored UUID string, mapping failures to a decode error.
pub(crate) fn parse_uuid(field: &str, value: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {field} UUID: {e}")))
}

/// Map a unique-index violation to [`DbError::Duplicate`].
///
/// SurrealDB reports violations as query errors mentioning the index;
/// the first matching field name wins, any other error passes through.
pub(crate) fn map_unique(
    entity: &'static str,
    fields: &[&'static str],
    err: surrealdb::Error,
) -> DbError {
    let msg = err.to_string();
    if msg.contains("already contains") {
        let field = fields
            .iter()
            .find(|f| msg.contains(*f as &str))
            .or(fields.first())
            .copied()
            .unwrap_or("unknown");
        return DbError::Duplicate {
            entity: entity.into(),
            field: field.into(),
        };
    }
    DbError::Surreal(err)
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
pub(crate) struct CountRow {
    pub total: u64,
}
