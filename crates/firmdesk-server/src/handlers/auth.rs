//! Account endpoints: register, login, logout, password reset.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use chrono::{DateTime, Utc};
use firmdesk_auth::service::{LoginInput, RegisterInput};
use firmdesk_core::models::user::{Role, User};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;

use crate::error::ApiError;
use crate::state::AppState;

/// Public view of an account; never exposes the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: uuid::Uuid,
    pub username: String,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            surname: user.surname,
            name: user.name,
            patronymic: user.patronymic,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub surname: String,
    pub name: String,
    #[serde(default)]
    pub patronymic: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

pub async fn register<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .auth
        .register(RegisterInput {
            username: body.username,
            surname: body.surname,
            name: body.name,
            patronymic: body.patronymic,
            email: body.email,
            password: body.password,
            password_confirm: body.password_confirm,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

pub async fn login<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let out = state
        .auth
        .login(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        token: out.token,
        expires_at: out.expires_at,
        user: out.user.into(),
    }))
}

pub async fn logout<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        state.auth.logout(token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct PasswordRecoveryRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct PasswordRecoveryResponse {
    /// Always the same wording, whether or not the account exists.
    pub message: &'static str,
}

pub async fn password_recovery<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    Json(body): Json<PasswordRecoveryRequest>,
) -> Result<Json<PasswordRecoveryResponse>, ApiError> {
    state.auth.request_password_reset(&body.email).await?;
    Ok(Json(PasswordRecoveryResponse {
        message: "if the address is registered, a reset link has been sent",
    }))
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub token: String,
    pub password: String,
    pub password_confirm: String,
}

pub async fn password_reset<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    Json(body): Json<PasswordResetRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .auth
        .reset_password(&body.token, &body.password, &body.password_confirm)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
