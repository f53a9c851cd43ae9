//! Request extractors.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use firmdesk_core::Requester;
use firmdesk_core::error::FirmError;
use surrealdb::Connection;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated requester, resolved from a `Bearer` session token.
pub struct AuthUser(pub Requester);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl<C: Connection> FromRequestParts<Arc<AppState<C>>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<C>>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            ApiError(FirmError::AuthenticationFailed {
                reason: "missing bearer token".into(),
            })
        })?;
        let requester = state.auth.authenticate(token).await?;
        Ok(Self(requester))
    }
}
