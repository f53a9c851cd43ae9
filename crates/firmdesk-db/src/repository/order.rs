//! SurrealDB implementation of [`OrderRepository`].
//!
//! Orders live in the `client_order` table (`ORDER` is a SurrealQL
//! keyword). Deleting an order cascades to its items, payments and
//! feedback.

use chrono::{DateTime, Utc};
use firmdesk_core::error::FirmResult;
use firmdesk_core::models::order::{Order, OrderDraft, OrderItem, OrderItemDraft, UpdateOrder};
use firmdesk_core::policy::RecordScope;
use firmdesk_core::repository::{OrderRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct OrderRow {
    status_id: Option<String>,
    content: Option<String>,
    created_at: DateTime<Utc>,
    client_id: String,
    courier_id: Option<String>,
    created_by: String,
}

#[derive(Debug, SurrealValue)]
struct OrderRowWithId {
    record_id: String,
    status_id: Option<String>,
    content: Option<String>,
    created_at: DateTime<Utc>,
    client_id: String,
    courier_id: Option<String>,
    created_by: String,
}

fn parse_opt_uuid(field: &str, value: Option<String>) -> Result<Option<Uuid>, DbError> {
    value.map(|v| parse_uuid(field, &v)).transpose()
}

impl OrderRow {
    fn into_order(self, id: Uuid) -> Result<Order, DbError> {
        Ok(Order {
            id,
            status_id: parse_opt_uuid("status_id", self.status_id)?,
            content: self.content,
            created_at: self.created_at,
            client_id: parse_uuid("client_id", &self.client_id)?,
            courier_id: parse_opt_uuid("courier_id", self.courier_id)?,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

impl OrderRowWithId {
    fn try_into_order(self) -> Result<Order, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        Ok(Order {
            id,
            status_id: parse_opt_uuid("status_id", self.status_id)?,
            content: self.content,
            created_at: self.created_at,
            client_id: parse_uuid("client_id", &self.client_id)?,
            courier_id: parse_opt_uuid("courier_id", self.courier_id)?,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct OrderItemRow {
    order_id: String,
    product_id: String,
    amount: i64,
    price_cents: i64,
}

#[derive(Debug, SurrealValue)]
struct OrderItemRowWithId {
    record_id: String,
    order_id: String,
    product_id: String,
    amount: i64,
    price_cents: i64,
}

impl OrderItemRow {
    fn into_item(self, id: Uuid) -> Result<OrderItem, DbError> {
        Ok(OrderItem {
            id,
            order_id: parse_uuid("order_id", &self.order_id)?,
            product_id: parse_uuid("product_id", &self.product_id)?,
            amount: self.amount,
            price_cents: self.price_cents,
        })
    }
}

impl OrderItemRowWithId {
    fn try_into_item(self) -> Result<OrderItem, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        Ok(OrderItem {
            id,
            order_id: parse_uuid("order_id", &self.order_id)?,
            product_id: parse_uuid("product_id", &self.product_id)?,
            amount: self.amount,
            price_cents: self.price_cents,
        })
    }
}

/// SurrealDB implementation of the Order repository.
#[derive(Clone)]
pub struct SurrealOrderRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrderRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OrderRepository for SurrealOrderRepository<C> {
    async fn create(&self, creator: Uuid, draft: OrderDraft) -> FirmResult<Order> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('client_order', $id) SET \
                 status_id = $status_id, content = $content, \
                 client_id = $client_id, courier_id = $courier_id, \
                 created_by = $created_by",
            )
            .bind(("id", id_str.clone()))
            .bind(("status_id", draft.status_id.map(|u| u.to_string())))
            .bind(("content", draft.content))
            .bind(("client_id", draft.client_id.to_string()))
            .bind(("courier_id", draft.courier_id.map(|u| u.to_string())))
            .bind(("created_by", creator.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> FirmResult<Order> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('client_order', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateOrder) -> FirmResult<Order> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.client_id.is_some() {
            sets.push("client_id = $client_id");
        }
        if input.courier_id.is_some() {
            sets.push("courier_id = $courier_id");
        }
        if input.status_id.is_some() {
            sets.push("status_id = $status_id");
        }
        if input.content.is_some() {
            sets.push("content = $content");
        }
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('client_order', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(client_id) = input.client_id {
            builder = builder.bind(("client_id", client_id.to_string()));
        }
        if let Some(courier_id) = input.courier_id {
            // Option<Option<Uuid>>: Some(Some(v)) = set, Some(None) = clear
            builder = builder.bind(("courier_id", courier_id.map(|u| u.to_string())));
        }
        if let Some(status_id) = input.status_id {
            builder = builder.bind(("status_id", status_id.map(|u| u.to_string())));
        }
        if let Some(content) = input.content {
            builder = builder.bind(("content", content));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn delete(&self, id: Uuid) -> FirmResult<()> {
        let id_str = id.to_string();

        self.db
            .query(
                "DELETE order_item WHERE order_id = $id;
                 DELETE payment WHERE order_id = $id;
                 DELETE feedback WHERE order_id = $id;
                 DELETE type::record('client_order', $id);",
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
    ) -> FirmResult<PaginatedResult<Order>> {
        let creator_filter = match scope {
            RecordScope::All => "",
            RecordScope::CreatedBy(_) => "WHERE created_by = $creator ",
        };

        let count_query =
            format!("SELECT count() AS total FROM client_order {creator_filter}GROUP ALL");
        let mut count_builder = self.db.query(&count_query);
        if let RecordScope::CreatedBy(creator) = scope {
            count_builder = count_builder.bind(("creator", creator.to_string()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM client_order \
             {creator_filter}ORDER BY created_at ASC \
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

        let rows: Vec<OrderRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_order())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn add_item(&self, order_id: Uuid, draft: OrderItemDraft) -> FirmResult<OrderItem> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('order_item', $id) SET \
                 order_id = $order_id, product_id = $product_id, \
                 amount = $amount, price_cents = $price_cents",
            )
            .bind(("id", id_str.clone()))
            .bind(("order_id", order_id.to_string()))
            .bind(("product_id", draft.product_id.to_string()))
            .bind(("amount", draft.amount))
            .bind(("price_cents", draft.price_cents))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<OrderItemRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order_item".into(),
            id: id_str,
        })?;

        Ok(row.into_item(id)?)
    }

    async fn items(&self, order_id: Uuid) -> FirmResult<Vec<OrderItem>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM order_item \
                 WHERE order_id = $order_id",
            )
            .bind(("order_id", order_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderItemRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_item())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }

    async fn remove_item(&self, order_id: Uuid, item_id: Uuid) -> FirmResult<()> {
        self.db
            .query(
                "DELETE order_item WHERE meta::id(id) = $item_id \
                 AND order_id = $order_id",
            )
            .bind(("item_id", item_id.to_string()))
            .bind(("order_id", order_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }
}
