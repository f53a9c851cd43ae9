//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub client_id: Uuid,
    pub paid_at: DateTime<Utc>,
    pub status_id: Option<Uuid>,
    pub amount_cents: i64,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub order_id: Uuid,
    pub client_id: Uuid,
    pub status_id: Option<Uuid>,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePayment {
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub status_id: Option<Option<Uuid>>,
    pub amount_cents: Option<i64>,
}
