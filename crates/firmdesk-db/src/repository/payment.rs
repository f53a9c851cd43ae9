//! SurrealDB implementation of [`PaymentRepository`].

use chrono::{DateTime, Utc};
use firmdesk_core::error::FirmResult;
use firmdesk_core::models::payment::{Payment, PaymentDraft, UpdatePayment};
use firmdesk_core::policy::RecordScope;
use firmdesk_core::repository::{PaginatedResult, Pagination, PaymentRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct PaymentRow {
    order_id: String,
    client_id: String,
    paid_at: DateTime<Utc>,
    status_id: Option<String>,
    amount_cents: i64,
    created_by: String,
}

#[derive(Debug, SurrealValue)]
struct PaymentRowWithId {
    record_id: String,
    order_id: String,
    client_id: String,
    paid_at: DateTime<Utc>,
    status_id: Option<String>,
    amount_cents: i64,
    created_by: String,
}

impl PaymentRow {
    fn into_payment(self, id: Uuid) -> Result<Payment, DbError> {
        Ok(Payment {
            id,
            order_id: parse_uuid("order_id", &self.order_id)?,
            client_id: parse_uuid("client_id", &self.client_id)?,
            paid_at: self.paid_at,
            status_id: self
                .status_id
                .map(|v| parse_uuid("status_id", &v))
                .transpose()?,
            amount_cents: self.amount_cents,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

impl PaymentRowWithId {
    fn try_into_payment(self) -> Result<Payment, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        Ok(Payment {
            id,
            order_id: parse_uuid("order_id", &self.order_id)?,
            client_id: parse_uuid("client_id", &self.client_id)?,
            paid_at: self.paid_at,
            status_id: self
                .status_id
                .map(|v| parse_uuid("status_id", &v))
                .transpose()?,
            amount_cents: self.amount_cents,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

/// SurrealDB implementation of the Payment repository.
#[derive(Clone)]
pub struct SurrealPaymentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPaymentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PaymentRepository for SurrealPaymentRepository<C> {
    async fn create(&self, creator: Uuid, draft: PaymentDraft) -> FirmResult<Payment> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('payment', $id) SET \
                 order_id = $order_id, client_id = $client_id, \
                 status_id = $status_id, amount_cents = $amount_cents, \
                 created_by = $created_by",
            )
            .bind(("id", id_str.clone()))
            .bind(("order_id", draft.order_id.to_string()))
            .bind(("client_id", draft.client_id.to_string()))
            .bind(("status_id", draft.status_id.map(|u| u.to_string())))
            .bind(("amount_cents", draft.amount_cents))
            .bind(("created_by", creator.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<PaymentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "payment".into(),
            id: id_str,
        })?;

        Ok(row.into_payment(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> FirmResult<Payment> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('payment', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PaymentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "payment".into(),
            id: id_str,
        })?;

        Ok(row.into_payment(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdatePayment) -> FirmResult<Payment> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.status_id.is_some() {
            sets.push("status_id = $status_id");
        }
        if input.amount_cents.is_some() {
            sets.push("amount_cents = $amount_cents");
        }
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('payment', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(status_id) = input.status_id {
            // Option<Option<Uuid>>: Some(Some(v)) = set, Some(None) = clear
            builder = builder.bind(("status_id", status_id.map(|u| u.to_string())));
        }
        if let Some(amount_cents) = input.amount_cents {
            builder = builder.bind(("amount_cents", amount_cents));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<PaymentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "payment".into(),
            id: id_str,
        })?;

        Ok(row.into_payment(id)?)
    }

    async fn delete(&self, id: Uuid) -> FirmResult<()> {
        self.db
            .query("DELETE type::record('payment', $id)")
            .bind(("id", id.to_string()))
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
    ) -> FirmResult<PaginatedResult<Payment>> {
        let creator_filter = match scope {
            RecordScope::All => "",
            RecordScope::CreatedBy(_) => "WHERE created_by = $creator ",
        };

        let count_query =
            format!("SELECT count() AS total FROM payment {creator_filter}GROUP ALL");
        let mut count_builder = self.db.query(&count_query);
        if let RecordScope::CreatedBy(creator) = scope {
            count_builder = count_builder.bind(("creator", creator.to_string()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM payment \
             {creator_filter}ORDER BY paid_at ASC \
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

        let rows: Vec<PaymentRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_payment())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
