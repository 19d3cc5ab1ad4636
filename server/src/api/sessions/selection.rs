use super::SessionResponse;
use crate::api::{find_session, ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSelectionRequest {
    /// Parameter name to new value. "None" clears a parameter.
    pub values: HashMap<String, String>,
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}/selection",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = UpdateSelectionRequest,
    responses(
        (status = 200, description = "Selection updated", body = SessionResponse),
        (status = 400, description = "Unknown parameter or invalid option; nothing changed", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn update_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSelectionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = find_session(&state, id)?;
    let mut session = session.lock().await;

    session.update_selection(
        request
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    )?;

    Ok(Json(SessionResponse::new(id, &session)))
}
