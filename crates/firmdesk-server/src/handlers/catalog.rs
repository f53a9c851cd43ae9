//! Product and category endpoints.
//!
//! The catalog is not creator-owned; authentication is still required.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use firmdesk_core::models::category::{Category, CreateCategory};
use firmdesk_core::models::product::{Product, ProductDraft, UpdateProduct};
use surrealdb::Connection;
use uuid::Uuid;

use super::{ListQuery, ListResponse};
use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

pub async fn list_products<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<Product>>, ApiError> {
    let page = state.catalog.list_products(query.pagination()).await?;
    Ok(Json(page.into()))
}

pub async fn create_product<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.catalog.create_product(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.catalog.get_product(id).await?))
}

pub async fn update_product<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.catalog.update_product(id, input).await?))
}

pub async fn remove_product<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_categories<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.catalog.list_categories().await?))
}

pub async fn create_category<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Json(input): Json<CreateCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.catalog.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn remove_category<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(_requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
