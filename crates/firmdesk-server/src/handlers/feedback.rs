//! Feedback endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use firmdesk_core::models::feedback::{Feedback, FeedbackDraft, UpdateFeedback};
use surrealdb::Connection;
use uuid::Uuid;

use super::{ListQuery, ListResponse};
use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

pub async fn list<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<Feedback>>, ApiError> {
    let page = state.feedback.list(&requester, query.pagination()).await?;
    Ok(Json(page.into()))
}

pub async fn create<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Json(draft): Json<FeedbackDraft>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    let feedback = state.feedback.create(&requester, draft).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

pub async fn get_one<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Feedback>, ApiError> {
    Ok(Json(state.feedback.get(&requester, id).await?))
}

pub async fn update<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateFeedback>,
) -> Result<Json<Feedback>, ApiError> {
    Ok(Json(state.feedback.update(&requester, id, input).await?))
}

pub async fn remove<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.feedback.delete(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
