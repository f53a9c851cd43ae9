//! Order and order-item domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub status_id: Option<Uuid>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub client_id: Uuid,
    pub courier_id: Option<Uuid>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub client_id: Uuid,
    pub courier_id: Option<Uuid>,
    pub status_id: Option<Uuid>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrder {
    pub client_id: Option<Uuid>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub courier_id: Option<Option<Uuid>>,
    pub status_id: Option<Option<Uuid>>,
    pub content: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub amount: i64,
    /// Unit price at the time the item was added.
    pub price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDraft {
    pub product_id: Uuid,
    pub amount: i64,
    pub price_cents: i64,
}
