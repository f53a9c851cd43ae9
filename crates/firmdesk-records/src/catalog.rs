//! Catalog service — products and the category dictionary.
//!
//! Neither is creator-owned in the source data, so no row-level
//! filtering applies; any authenticated user may manage the catalog.

use firmdesk_core::error::{FirmError, FirmResult};
use firmdesk_core::models::category::{Category, CreateCategory};
use firmdesk_core::models::product::{Product, ProductDraft, UpdateProduct};
use firmdesk_core::repository::{
    CategoryRepository, PaginatedResult, Pagination, ProductRepository,
};
use firmdesk_core::validation::FieldErrors;
use uuid::Uuid;

pub struct CatalogService<P: ProductRepository, C: CategoryRepository> {
    products: P,
    categories: C,
}

impl<P: ProductRepository, C: CategoryRepository> CatalogService<P, C> {
    pub fn new(products: P, categories: C) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn list_products(
        &self,
        pagination: Pagination,
    ) -> FirmResult<PaginatedResult<Product>> {
        self.products.list(pagination).await
    }

    pub async fn create_product(&self, draft: ProductDraft) -> FirmResult<Product> {
        let mut errors = FieldErrors::new();
        if draft.name.trim().is_empty() {
            errors.push("name", "must not be empty");
        }
        if draft.price_cents < 0 {
            errors.push("price_cents", "must not be negative");
        }
        if draft.stock < 0 {
            errors.push("stock", "must not be negative");
        }
        errors.into_result()?;

        self.products.create(draft).await
    }

    pub async fn get_product(&self, id: Uuid) -> FirmResult<Product> {
        self.products.get_by_id(id).await
    }

    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> FirmResult<Product> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &input.name {
            if name.trim().is_empty() {
                errors.push("name", "must not be empty");
            }
        }
        if let Some(price_cents) = input.price_cents {
            if price_cents < 0 {
                errors.push("price_cents", "must not be negative");
            }
        }
        if let Some(stock) = input.stock {
            if stock < 0 {
                errors.push("stock", "must not be negative");
            }
        }
        errors.into_result()?;

        self.products.update(id, input).await
    }

    pub async fn delete_product(&self, id: Uuid) -> FirmResult<()> {
        self.products.delete(id).await
    }

    pub async fn list_categories(&self) -> FirmResult<Vec<Category>> {
        self.categories.list().await
    }

    pub async fn create_category(&self, input: CreateCategory) -> FirmResult<Category> {
        let mut errors = FieldErrors::new();
        if input.name.trim().is_empty() {
            errors.push("name", "must not be empty");
        }
        if errors.is_empty() {
            // Friendly duplicate message before the index backstop.
            match self.categories.get_by_name(&input.name).await {
                Ok(_) => errors.push("name", "a category with this name already exists"),
                Err(FirmError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        errors.into_result()?;

        self.categories.create(input).await
    }

    pub async fn delete_category(&self, id: Uuid) -> FirmResult<()> {
        self.categories.delete(id).await
    }
}
