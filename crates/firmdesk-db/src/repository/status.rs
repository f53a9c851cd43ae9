//! SurrealDB implementation of [`StatusRepository`].
//!
//! One implementation serves both status dictionaries; the kind
//! selects the table. Deleting a status nullifies `status_id` on the
//! rows that reference it (orders or payments respectively).

use firmdesk_core::error::FirmResult;
use firmdesk_core::models::status::{Status, StatusKind};
use firmdesk_core::repository::StatusRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct StatusRow {
    name: String,
}

#[derive(Debug, SurrealValue)]
struct StatusRowWithId {
    record_id: String,
    name: String,
}

fn table(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Order => "order_status",
        StatusKind::Payment => "payment_status",
    }
}

/// The table whose `status_id` references this dictionary.
fn referencing_table(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Order => "client_order",
        StatusKind::Payment => "payment",
    }
}

/// SurrealDB implementation of the status dictionaries.
#[derive(Clone)]
pub struct SurrealStatusRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealStatusRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> StatusRepository for SurrealStatusRepository<C> {
    async fn create(&self, kind: StatusKind, name: &str) -> FirmResult<Status> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let query = format!(
            "CREATE type::record('{}', $id) SET name = $name",
            table(kind)
        );
        let result = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<StatusRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: table(kind).into(),
            id: id_str,
        })?;

        Ok(Status { id, name: row.name })
    }

    async fn get_by_id(&self, kind: StatusKind, id: Uuid) -> FirmResult<Status> {
        let id_str = id.to_string();

        let query = format!("SELECT * FROM type::record('{}', $id)", table(kind));
        let mut result = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StatusRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: table(kind).into(),
            id: id_str,
        })?;

        Ok(Status { id, name: row.name })
    }

    async fn list(&self, kind: StatusKind) -> FirmResult<Vec<Status>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM {} ORDER BY name ASC",
            table(kind)
        );
        let mut result = self.db.query(&query).await.map_err(DbError::from)?;

        let rows: Vec<StatusRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| {
                let id = parse_uuid("record", &row.record_id)?;
                Ok(Status { id, name: row.name })
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }

    async fn delete(&self, kind: StatusKind, id: Uuid) -> FirmResult<()> {
        let query = format!(
            "UPDATE {} SET status_id = NONE WHERE status_id = $id;
             DELETE type::record('{}', $id);",
            referencing_table(kind),
            table(kind)
        );
        self.db
            .query(&query)
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }
}
