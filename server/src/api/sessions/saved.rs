use super::export::attachment;
use crate::api::{find_session, ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use recipace_core::export::{saved_filename, TXT_MIME};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaveResponse {
    /// 1-based position of the newly saved recipe.
    pub index: usize,
    pub saved_count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SavedRecipe {
    /// 1-based position in the saved list.
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SavedListResponse {
    pub recipes: Vec<SavedRecipe>,
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/save",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Current recipe appended to the saved list", body = SaveResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "No recipe to save", body = ErrorResponse)
    )
)]
pub async fn save_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveResponse>, ApiError> {
    let session = find_session(&state, id)?;
    let mut session = session.lock().await;

    let index = session.save()?;

    Ok(Json(SaveResponse {
        index,
        saved_count: session.saved().len(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/saved",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Saved recipes, oldest first", body = SavedListResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn list_saved(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedListResponse>, ApiError> {
    let session = find_session(&state, id)?;
    let session = session.lock().await;

    let recipes = session
        .saved()
        .iter()
        .enumerate()
        .map(|(i, text)| SavedRecipe {
            index: i + 1,
            text: text.clone(),
        })
        .collect();

    Ok(Json(SavedListResponse { recipes }))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/saved/{n}/txt",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("n" = usize, Path, description = "1-based position in the saved list")
    ),
    responses(
        (status = 200, description = "Saved recipe as plain text", content_type = "text/plain"),
        (status = 404, description = "Session or saved recipe not found", body = ErrorResponse)
    )
)]
pub async fn download_saved(
    State(state): State<AppState>,
    Path((id, n)): Path<(Uuid, usize)>,
) -> Result<Response, ApiError> {
    let session = find_session(&state, id)?;
    let session = session.lock().await;

    let text = session
        .saved_recipe(n)
        .ok_or_else(|| ApiError::NotFound(format!("No saved recipe at position {}", n)))?;

    Ok(attachment(TXT_MIME, &saved_filename(n), text.to_string()))
}
