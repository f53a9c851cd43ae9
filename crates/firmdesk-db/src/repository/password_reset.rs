//! SurrealDB implementation of [`PasswordResetRepository`].
//!
//! Consumption is a single conditional UPDATE so a token can only be
//! used once even under concurrent requests.

use chrono::{DateTime, Utc};
use firmdesk_core::error::FirmResult;
use firmdesk_core::models::password_reset::{CreatePasswordReset, PasswordReset};
use firmdesk_core::repository::PasswordResetRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct PasswordResetRow {
    user_id: String,
    token_hash: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    consumed: bool,
}

#[derive(Debug, SurrealValue)]
struct PasswordResetRowWithId {
    record_id: String,
    user_id: String,
    token_hash: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    consumed: bool,
}

impl PasswordResetRow {
    fn into_reset(self, id: Uuid) -> Result<PasswordReset, DbError> {
        Ok(PasswordReset {
            id,
            user_id: parse_uuid("user_id", &self.user_id)?,
            token_hash: self.token_hash,
            created_at: self.created_at,
            expires_at: self.expires_at,
            consumed: self.consumed,
        })
    }
}

impl PasswordResetRowWithId {
    fn try_into_reset(self) -> Result<PasswordReset, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        Ok(PasswordReset {
            id,
            user_id: parse_uuid("user_id", &self.user_id)?,
            token_hash: self.token_hash,
            created_at: self.created_at,
            expires_at: self.expires_at,
            consumed: self.consumed,
        })
    }
}

/// SurrealDB implementation of the PasswordReset repository.
#[derive(Clone)]
pub struct SurrealPasswordResetRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPasswordResetRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PasswordResetRepository for SurrealPasswordResetRepository<C> {
    async fn create(&self, input: CreatePasswordReset) -> FirmResult<PasswordReset> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        // A token derived from the same email is stable, so clear any
        // previous entry for this hash before inserting.
        let result = self
            .db
            .query(
                "DELETE password_reset WHERE token_hash = $token_hash;
                 CREATE type::record('password_reset', $id) SET \
                 user_id = $user_id, token_hash = $token_hash, \
                 expires_at = <datetime>$expires_at",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("token_hash", input.token_hash))
            .bind(("expires_at", input.expires_at))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<PasswordResetRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "password_reset".into(),
            id: id_str,
        })?;

        Ok(row.into_reset(id)?)
    }

    async fn consume(&self, token_hash: &str) -> FirmResult<PasswordReset> {
        let mut result = self
            .db
            .query(
                "UPDATE password_reset SET consumed = true \
                 WHERE token_hash = $token_hash AND consumed = false \
                 RETURN meta::id(id) AS record_id, *",
            )
            .bind(("token_hash", token_hash.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PasswordResetRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "password_reset".into(),
            id: "token".into(),
        })?;

        Ok(row.try_into_reset()?)
    }
}
