//! Client-list export endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use firmdesk_core::error::FirmError;
use firmdesk_export::{ClientRow, ExportFormat};
use surrealdb::Connection;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

fn parse_format(value: &str) -> Option<ExportFormat> {
    match value {
        "xlsx" => Some(ExportFormat::Xlsx),
        "docx" => Some(ExportFormat::Docx),
        "pdf" => Some(ExportFormat::Pdf),
        _ => None,
    }
}

/// `GET /api/clients/export/{format}` — download the visible client
/// list as a file attachment.
pub async fn export_clients<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(requester): AuthUser,
    Path(format): Path<String>,
) -> Result<Response, ApiError> {
    let format = parse_format(&format).ok_or_else(|| {
        ApiError(FirmError::NotFound {
            entity: "export format".into(),
            id: format.clone(),
        })
    })?;

    let clients = state.clients.list_for_export(&requester).await?;
    let rows: Vec<ClientRow> = clients.iter().map(ClientRow::from).collect();
    let bytes = firmdesk_export::render(&rows, format).map_err(FirmError::from)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        bytes,
    )
        .into_response())
}
