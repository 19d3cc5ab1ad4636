use crate::api::{find_session, ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use recipace_core::export::{share_text, DOCX_FILENAME, DOCX_MIME, TXT_FILENAME, TXT_MIME};
use recipace_core::SessionError;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShareResponse {
    /// Tweet intent link pre-filled with the recipe.
    pub url: String,
    /// Shared text, newlines encoded as %0A and cut to 250 characters.
    pub text: String,
}

/// A file download response.
pub fn attachment(content_type: &str, filename: &str, body: impl Into<Body>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body.into(),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/export/txt",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Current recipe as plain text", content_type = "text/plain"),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "No recipe to export", body = ErrorResponse)
    )
)]
pub async fn export_txt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let session = find_session(&state, id)?;
    let session = session.lock().await;

    let text = session.result().ok_or(SessionError::NoResult)?;
    Ok(attachment(TXT_MIME, TXT_FILENAME, text.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/export/docx",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Current recipe as a Word document",
         content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "No recipe to export", body = ErrorResponse),
        (status = 500, description = "Document could not be built", body = ErrorResponse)
    )
)]
pub async fn export_docx(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let session = find_session(&state, id)?;
    let session = session.lock().await;

    let bytes = session.export_docx(Some(Local::now().naive_local()))?;

    tracing::info!(session_id = %id, bytes = bytes.len(), "Exported docx");
    Ok(attachment(DOCX_MIME, DOCX_FILENAME, bytes))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/share",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Sharing link for the current recipe", body = ShareResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "No recipe to share", body = ErrorResponse)
    )
)]
pub async fn share(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShareResponse>, ApiError> {
    let session = find_session(&state, id)?;
    let session = session.lock().await;

    let url = session.share_url()?;
    let text = share_text(session.result().unwrap_or_default());

    Ok(Json(ShareResponse { url, text }))
}
