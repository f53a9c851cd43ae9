//! Order / payment status dictionary endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use firmdesk_core::models::status::{Status, StatusKind};
use serde::Deserialize;
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateStatusRequest {
    pub name: String,
}

async fn list_kind<C: Connection>(
    state: &AppState<C>,
    kind: StatusKind,
) -> Result<Json<Vec<Status>>, ApiError> {
    Ok(Json(state.statuses.list(kind).await?))
}

async fn create_kind<C: Connection>(
    state: &AppState<C>,
    kind: StatusKind,
    name: &str,
) -> Result<(StatusCode, Json<Status>), ApiError> {
    let status = state.statuses.create(kind, name).await?;
    Ok((StatusCode::CREATED, Json(status)))
}

async fn remove_kind<C: Connection>(
    state: &AppState<C>,
    kind: StatusKind,
    id: Uuid,
) -> Result<StatusCode, ApiError> {
    state.statuses.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_order<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
) -> Result<Json<Vec<Status>>, ApiError> {
    list_kind(&state, StatusKind::Order).await
}

pub async fn create_order<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Json(body): Json<CreateStatusRequest>,
) -> Result<(StatusCode, Json<Status>), ApiError> {
    create_kind(&state, StatusKind::Order, &body.name).await
}

pub async fn remove_order<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    remove_kind(&state, StatusKind::Order, id).await
}

pub async fn list_payment<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
) -> Result<Json<Vec<Status>>, ApiError> {
    list_kind(&state, StatusKind::Payment).await
}

pub async fn create_payment<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Json(body): Json<CreateStatusRequest>,
) -> Result<(StatusCode, Json<Status>), ApiError> {
    create_kind(&state, StatusKind::Payment, &body.name).await
}

pub async fn remove_payment<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    remove_kind(&state, StatusKind::Payment, id).await
}
