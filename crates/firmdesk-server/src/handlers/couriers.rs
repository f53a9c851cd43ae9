//! Courier record endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use firmdesk_core::models::courier::{Courier, CourierDraft};
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
) -> Result<Json<ListResponse<Courier>>, ApiError> {
    let page = state.couriers.list(&requester, query.pagination()).await?;
    Ok(Json(page.into()))
}

pub async fn create<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Json(draft): Json<CourierDraft>,
) -> Result<(StatusCode, Json<Courier>), ApiError> {
    let courier = state.couriers.create(&requester, draft).await?;
    Ok((StatusCode::CREATED, Json(courier)))
}

pub async fn get_one<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Courier>, ApiError> {
    Ok(Json(state.couriers.get(&requester, id).await?))
}

pub async fn update<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<CourierDraft>,
) -> Result<Json<Courier>, ApiError> {
    Ok(Json(state.couriers.update(&requester, id, draft).await?))
}

pub async fn remove<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.couriers.delete(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
