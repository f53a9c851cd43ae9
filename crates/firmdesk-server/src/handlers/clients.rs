//! Client record endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use firmdesk_core::models::client::{Client, ClientDraft};
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
) -> Result<Json<ListResponse<Client>>, ApiError> {
    let page = state.clients.list(&requester, query.pagination()).await?;
    Ok(Json(page.into()))
}

pub async fn create<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Json(draft): Json<ClientDraft>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let client = state.clients.create(&requester, draft).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn get_one<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.clients.get(&requester, id).await?))
}

pub async fn update<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<ClientDraft>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.clients.update(&requester, id, draft).await?))
}

pub async fn remove<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.clients.delete(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
