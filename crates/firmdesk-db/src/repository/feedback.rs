//! SurrealDB implementation of [`FeedbackRepository`].

use chrono::{DateTime, Utc};
use firmdesk_core::error::FirmResult;
use firmdesk_core::models::feedback::{Feedback, FeedbackDraft, UpdateFeedback};
use firmdesk_core::policy::RecordScope;
use firmdesk_core::repository::{FeedbackRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct FeedbackRow {
    order_id: String,
    client_id: String,
    reviewed_at: DateTime<Utc>,
    comment: Option<String>,
    rating: u32,
    created_by: String,
}

#[derive(Debug, SurrealValue)]
struct FeedbackRowWithId {
    record_id: String,
    order_id: String,
    client_id: String,
    reviewed_at: DateTime<Utc>,
    comment: Option<String>,
    rating: u32,
    created_by: String,
}

impl FeedbackRow {
    fn into_feedback(self, id: Uuid) -> Result<Feedback, DbError> {
        Ok(Feedback {
            id,
            order_id: parse_uuid("order_id", &self.order_id)?,
            client_id: parse_uuid("client_id", &self.client_id)?,
            reviewed_at: self.reviewed_at,
            comment: self.comment,
            rating: self.rating,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

impl FeedbackRowWithId {
    fn try_into_feedback(self) -> Result<Feedback, DbError> {
        let id = parse_uuid("record", &self.record_id)?;
        Ok(Feedback {
            id,
            order_id: parse_uuid("order_id", &self.order_id)?,
            client_id: parse_uuid("client_id", &self.client_id)?,
            reviewed_at: self.reviewed_at,
            comment: self.comment,
            rating: self.rating,
            created_by: parse_uuid("created_by", &self.created_by)?,
        })
    }
}

/// SurrealDB implementation of the Feedback repository.
#[derive(Clone)]
pub struct SurrealFeedbackRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealFeedbackRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> FeedbackRepository for SurrealFeedbackRepository<C> {
    async fn create(&self, creator: Uuid, draft: FeedbackDraft) -> FirmResult<Feedback> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('feedback', $id) SET \
                 order_id = $order_id, client_id = $client_id, \
                 comment = $comment, rating = $rating, \
                 created_by = $created_by",
            )
            .bind(("id", id_str.clone()))
            .bind(("order_id", draft.order_id.to_string()))
            .bind(("client_id", draft.client_id.to_string()))
            .bind(("comment", draft.comment))
            .bind(("rating", draft.rating))
            .bind(("created_by", creator.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<FeedbackRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "feedback".into(),
            id: id_str,
        })?;

        Ok(row.into_feedback(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> FirmResult<Feedback> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('feedback', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FeedbackRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "feedback".into(),
            id: id_str,
        })?;

        Ok(row.into_feedback(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateFeedback) -> FirmResult<Feedback> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.comment.is_some() {
            sets.push("comment = $comment");
        }
        if input.rating.is_some() {
            sets.push("rating = $rating");
        }
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('feedback', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(comment) = input.comment {
            // Option<Option<String>>: Some(Some(v)) = set, Some(None) = clear
            builder = builder.bind(("comment", comment));
        }
        if let Some(rating) = input.rating {
            builder = builder.bind(("rating", rating));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<FeedbackRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "feedback".into(),
            id: id_str,
        })?;

        Ok(row.into_feedback(id)?)
    }

    async fn delete(&self, id: Uuid) -> FirmResult<()> {
        self.db
            .query("DELETE type::record('feedback', $id)")
            .bind(("id", id.to_string()))
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
    ) -> FirmResult<PaginatedResult<Feedback>> {
        let creator_filter = match scope {
            RecordScope::All => "",
            RecordScope::CreatedBy(_) => "WHERE created_by = $creator ",
        };

        let count_query =
            format!("SELECT count() AS total FROM feedback {creator_filter}GROUP ALL");
        let mut count_builder = self.db.query(&count_query);
        if let RecordScope::CreatedBy(creator) = scope {
            count_builder = count_builder.bind(("creator", creator.to_string()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM feedback \
             {creator_filter}ORDER BY reviewed_at ASC \
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

        let rows: Vec<FeedbackRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_feedback())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
