//! SurrealDB implementation of [`CategoryRepository`].

use firmdesk_core::error::FirmResult;
use firmdesk_core::models::category::{Category, CreateCategory};
use firmdesk_core::repository::CategoryRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{map_unique, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CategoryRow {
    name: String,
}

#[derive(Debug, SurrealValue)]
struct CategoryRowWithId {
    record_id: String,
    name: String,
}

impl CategoryRowWithId {
    fn try_into_category(self) -> Result<Category, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        Ok(Category {
            id,
            name: self.name,
        })
    }
}

/// SurrealDB implementation of the Category repository.
#[derive(Clone)]
pub struct SurrealCategoryRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCategoryRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CategoryRepository for SurrealCategoryRepository<C> {
    async fn create(&self, input: CreateCategory) -> FirmResult<Category> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query("CREATE type::record('category', $id) SET name = $name")
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| map_unique("category", &["name"], e))?;

        let rows: Vec<CategoryRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "category".into(),
            id: id_str,
        })?;

        Ok(Category { id, name: row.name })
    }

    async fn get_by_name(&self, name: &str) -> FirmResult<Category> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM category \
                 WHERE name = $name",
            )
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CategoryRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "category".into(),
            id: format!("name={name}"),
        })?;

        Ok(row.try_into_category()?)
    }

    async fn list(&self) -> FirmResult<Vec<Category>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM category \
                 ORDER BY name ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CategoryRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_category())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }

    async fn delete(&self, id: Uuid) -> FirmResult<()> {
        self.db
            .query("DELETE type::record('category', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }
}
