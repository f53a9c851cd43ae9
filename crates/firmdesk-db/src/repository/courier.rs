//! SurrealDB implementation of [`CourierRepository`].
//!
//! Deleting a courier nullifies `courier_id` on referencing orders
//! (couriers are an optional reference, not an owning parent).

use chrono::{DateTime, Utc};
use firmdesk_core::error::FirmResult;
use firmdesk_core::models::courier::{Courier, CourierDraft};
use firmdesk_core::policy::RecordScope;
use firmdesk_core::repository::{CourierRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, map_unique, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CourierRow {
    surname: String,
    name: String,
    email: String,
    registered_at: DateTime<Utc>,
    created_by: String,
}

#[derive(Debug, SurrealValue)]
struct CourierRowWithId {
    record_id: String,
    surname: String,
    name: String,
    email: String,
    registered_at: DateTime<Utc>,
    created_by: String,
}

impl CourierRow {
    fn into_courier(self, id: Uuid) -> Result<Courier, DbError> {
        Ok(Courier {
            id,
            surname: self.surname,
            name: self.name,
            email: self.email,
            registered_at: self.registered_at,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

impl CourierRowWithId {
    fn try_into_courier(self) -> Result<Courier, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        Ok(Courier {
            id,
            surname: self.surname,
            name: self.name,
            email: self.email,
            registered_at: self.registered_at,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

/// SurrealDB implementation of the Courier repository.
#[derive(Clone)]
pub struct SurrealCourierRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCourierRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CourierRepository for SurrealCourierRepository<C> {
    async fn create(&self, creator: Uuid, draft: CourierDraft) -> FirmResult<Courier> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('courier', $id) SET \
                 surname = $surname, name = $name, \
                 email = $email, created_by = $created_by",
            )
            .bind(("id", id_str.clone()))
            .bind(("surname", draft.surname))
            .bind(("name", draft.name))
            .bind(("email", draft.email))
            .bind(("created_by", creator.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| map_unique("courier", &["email"], e))?;

        let rows: Vec<CourierRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "courier".into(),
            id: id_str,
        })?;

        Ok(row.into_courier(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> FirmResult<Courier> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('courier', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CourierRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "courier".into(),
            id: id_str,
        })?;

        Ok(row.into_courier(id)?)
    }

    async fn get_by_email(&self, email: &str) -> FirmResult<Courier> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM courier \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CourierRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "courier".into(),
            id: format!("email={email}"),
        })?;

        Ok(row.try_into_courier()?)
    }

    async fn update(&self, id: Uuid, draft: CourierDraft) -> FirmResult<Courier> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('courier', $id) SET \
                 surname = $surname, name = $name, email = $email",
            )
            .bind(("id", id_str.clone()))
            .bind(("surname", draft.surname))
            .bind(("name", draft.name))
            .bind(("email", draft.email))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| map_unique("courier", &["email"], e))?;

        let rows: Vec<CourierRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "courier".into(),
            id: id_str,
        })?;

        Ok(row.into_courier(id)?)
    }

    async fn delete(&self, id: Uuid) -> FirmResult<()> {
        let id_str = id.to_string();

        self.db
            .query(
                "UPDATE client_order SET courier_id = NONE \
                     WHERE courier_id = $id;
                 DELETE type::record('courier', $id);",
            )
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(
        &self,
        scope: RecordScope,
        pagination: Pagination,
    ) -> FirmResult<PaginatedResult<Courier>> {
        let creator_filter = match scope {
            RecordScope::All => "",
            RecordScope::CreatedBy(_) => "WHERE created_by = $creator ",
        };

        let count_query =
            format!("SELECT count() AS total FROM courier {creator_filter}GROUP ALL");
        let mut count_builder = self.db.query(&count_query);
        if let RecordScope::CreatedBy(creator) = scope {
            count_builder = count_builder.bind(("creator", creator.to_string()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM courier \
             {creator_filter}ORDER BY registered_at ASC \
             LIMIT $limit START $offset"
        );
        let mut builder = self
            .db
            .query(&query)
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        if let RecordScope::CreatedBy(creator) = scope {
            builder = builder.bind(("creator", creator.to_string()));
        }
        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<CourierRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_courier())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
