//! Feedback domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub order_id: Uuid,
    pub client_id: Uuid,
    pub reviewed_at: DateTime<Utc>,
    pub comment: Option<String>,
    /// 1–5 inclusive.
    pub rating: u32,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub order_id: Uuid,
    pub client_id: Uuid,
    pub comment: Option<String>,
    pub rating: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFeedback {
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub comment: Option<Option<String>>,
    pub rating: Option<u32>,
}
