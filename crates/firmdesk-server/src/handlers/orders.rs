//! Order endpoints, including order items.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use firmdesk_core::models::order::{Order, OrderDraft, OrderItem, OrderItemDraft, UpdateOrder};
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
) -> Result<Json<ListResponse<Order>>, ApiError> {
    let page = state.orders.list(&requester, query.pagination()).await?;
    Ok(Json(page.into()))
}

pub async fn create<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.orders.create(&requester, draft).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_one<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get(&requester, id).await?))
}

pub async fn update<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateOrder>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.update(&requester, id, input).await?))
}

pub async fn remove<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.orders.delete(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_items<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<OrderItem>>, ApiError> {
    Ok(Json(state.orders.items(&requester, id).await?))
}

pub async fn add_item<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<OrderItemDraft>,
) -> Result<(StatusCode, Json<OrderItem>), ApiError> {
    let item = state.orders.add_item(&requester, id, draft).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn remove_item<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state.orders.remove_item(&requester, id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
