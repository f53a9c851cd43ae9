//! SurrealDB implementation of [`ClientRepository`].
//!
//! Deleting a client cascades to its orders (and their items),
//! payments and feedback, mirroring the configured on-delete policy.

use chrono::{DateTime, Utc};
use firmdesk_core::error::FirmResult;
use firmdesk_core::models::client::{Client, ClientDraft};
use firmdesk_core::policy::RecordScope;
use firmdesk_core::repository::{ClientRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, map_unique, parse_uuid};
use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ClientRow {
    surname: String,
    name: String,
    email: String,
    registered_at: DateTime<Utc>,
    created_by: String,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ClientRowWithId {
    record_id: String,
    surname: String,
    name: String,
    email: String,
    registered_at: DateTime<Utc>,
    created_by: String,
}

impl ClientRow {
    fn into_client(self, id: Uuid) -> Result<Client, DbError> {
        Ok(Client {
            id,
            surname: self.surname,
            name: self.name,
            email: self.email,
            registered_at: self.registered_at,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

impl ClientRowWithId {
    fn try_into_client(self) -> Result<Client, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        Ok(Client {
            id,
            surname: self.surname,
            name: self.name,
            email: self.email,
            registered_at: self.registered_at,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

/// SurrealDB implementation of the Client repository.
#[derive(Clone)]
pub struct SurrealClientRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealClientRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ClientRepository for SurrealClientRepository<C> {
    async fn create(&self, creator: Uuid, draft: ClientDraft) -> FirmResult<Client> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('client', $id) SET \
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
            .map_err(|e| map_unique("client", &["email"], e))?;

        let rows: Vec<ClientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client".into(),
            id: id_str,
        })?;

        Ok(row.into_client(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> FirmResult<Client> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('client', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ClientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client".into(),
            id: id_str,
        })?;

        Ok(row.into_client(id)?)
    }

    async fn get_by_email(&self, email: &str) -> FirmResult<Client> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM client \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ClientRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client".into(),
            id: format!("email={email}"),
        })?;

        Ok(row.try_into_client()?)
    }

    async fn update(&self, id: Uuid, draft: ClientDraft) -> FirmResult<Client> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('client', $id) SET \
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
            .map_err(|e| map_unique("client", &["email"], e))?;

        let rows: Vec<ClientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "client".into(),
            id: id_str,
        })?;

        Ok(row.into_client(id)?)
    }

    async fn delete(&self, id: Uuid) -> FirmResult<()> {
        let id_str = id.to_string();

        // Cascade: items of the client's orders, then the orders
        // themselves, payments, feedback, and finally the client.
        self.db
            .query(
                "DELETE order_item WHERE order_id IN \
                     (SELECT VALUE meta::id(id) FROM client_order \
                      WHERE client_id = $id);
                 DELETE client_order WHERE client_id = $id;
                 DELETE payment WHERE client_id = $id;
                 DELETE feedback WHERE client_id = $id;
                 DELETE type::record('client', $id);",
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
    ) -> FirmResult<PaginatedResult<Client>> {
        let creator_filter = match scope {
            RecordScope::All => "",
            RecordScope::CreatedBy(_) => "WHERE created_by = $creator ",
        };

        let count_query =
            format!("SELECT count() AS total FROM client {creator_filter}GROUP ALL");
        let mut count_builder = self.db.query(&count_query);
        if let RecordScope::CreatedBy(creator) = scope {
            count_builder = count_builder.bind(("creator", creator.to_string()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM client \
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

        let rows: Vec<ClientRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_client())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_all(&self, scope: RecordScope) -> FirmResult<Vec<Client>> {
        let creator_filter = match scope {
            RecordScope::All => "",
            RecordScope::CreatedBy(_) => "WHERE created_by = $creator ",
        };

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM client \
             {creator_filter}ORDER BY registered_at ASC"
        );
        let mut builder = self.db.query(&query);
        if let RecordScope::CreatedBy(creator) = scope {
            builder = builder.bind(("creator", creator.to_string()));
        }
        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<ClientRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_client())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
