//! Courier domain model. Same shape and rules as [`super::client`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Courier {
    pub id: Uuid,
    pub surname: String,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    pub created_by: Uuid,
}

/// Form input for creating or fully replacing a courier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierDraft {
    pub surname: String,
    pub name: String,
    pub email: String,
}
