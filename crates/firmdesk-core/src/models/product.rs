//! Product domain model.
//!
//! Monetary amounts are integer cents throughout the system.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price_cents: i64,
    /// Free-form category label (not a foreign key in the source data).
    pub category: Option<String>,
    pub stock: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price_cents: i64,
    pub category: Option<String>,
    pub stock: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub category: Option<Option<String>>,
    pub stock: Option<i64>,
}
