//! SurrealDB implementation of [`ProductRepository`].
//!
//! Deleting a product cascades to order items that reference it.

use firmdesk_core::error::FirmResult;
use firmdesk_core::models::product::{Product, ProductDraft, UpdateProduct};
use firmdesk_core::repository::{PaginatedResult, Pagination, ProductRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ProductRow {
    name: String,
    price_cents: i64,
    category: Option<String>,
    stock: i64,
}

#[derive(Debug, SurrealValue)]
struct ProductRowWithId {
    record_id: String,
    name: String,
    price_cents: i64,
    category: Option<String>,
    stock: i64,
}

impl ProductRow {
    fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name,
            price_cents: self.price_cents,
            category: self.category,
            stock: self.stock,
        }
    }
}

impl ProductRowWithId {
    fn try_into_product(self) -> Result<Product, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        Ok(Product {
            id,
            name: self.name,
            price_cents: self.price_cents,
            category: self.category,
            stock: self.stock,
        })
    }
}

/// SurrealDB implementation of the Product repository.
#[derive(Clone)]
pub struct SurrealProductRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProductRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ProductRepository for SurrealProductRepository<C> {
    async fn create(&self, draft: ProductDraft) -> FirmResult<Product> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('product', $id) SET \
                 name = $name, price_cents = $price_cents, \
                 category = $category, stock = $stock",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", draft.name))
            .bind(("price_cents", draft.price_cents))
            .bind(("category", draft.category))
            .bind(("stock", draft.stock))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id))
    }

    async fn get_by_id(&self, id: Uuid) -> FirmResult<Product> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('product', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id))
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> FirmResult<Product> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.price_cents.is_some() {
            sets.push("price_cents = $price_cents");
        }
        if input.category.is_some() {
            sets.push("category = $category");
        }
        if input.stock.is_some() {
            sets.push("stock = $stock");
        }
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('product', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(price_cents) = input.price_cents {
            builder = builder.bind(("price_cents", price_cents));
        }
        if let Some(category) = input.category {
            // Option<Option<String>>: Some(Some(v)) = set, Some(None) = clear
            builder = builder.bind(("category", category));
        }
        if let Some(stock) = input.stock {
            builder = builder.bind(("stock", stock));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id))
    }

    async fn delete(&self, id: Uuid) -> FirmResult<()> {
        let id_str = id.to_string();

        self.db
            .query(
                "DELETE order_item WHERE product_id = $id;
                 DELETE type::record('product', $id);",
            )
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> FirmResult<PaginatedResult<Product>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM product GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM product \
                 ORDER BY name ASC LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_product())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
