//! Client domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub surname: String,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    /// The user who created this row; basis for row-level access.
    pub created_by: Uuid,
}

/// Form input for creating or fully replacing a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDraft {
    pub surname: String,
    pub name: String,
    pub email: String,
}
