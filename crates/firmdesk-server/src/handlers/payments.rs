//! Payment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use firmdesk_core::models::payment::{Payment, PaymentDraft, UpdatePayment};
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
) -> Result<Json<ListResponse<Payment>>, ApiError> {
    let page = state.payments.list(&requester, query.pagination()).await?;
    Ok(Json(page.into()))
}

pub async fn create<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Json(draft): Json<PaymentDraft>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = state.payments.create(&requester, draft).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn get_one<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, ApiError> {
    Ok(Json(state.payments.get(&requester, id).await?))
}

pub async fn update<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePayment>,
) -> Result<Json<Payment>, ApiError> {
    Ok(Json(state.payments.update(&requester, id, input).await?))
}

pub async fn remove<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.payments.delete(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
