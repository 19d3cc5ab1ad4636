use crate::api::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.sessions.remove(id) {
        return Err(ApiError::NotFound("Session not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
