use super::Phase;
use crate::api::{find_session, ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use recipace_core::PromptFlags;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Ask for plating suggestions and beverage pairings.
    #[serde(default)]
    pub chef_mode: bool,
    /// Ask for a video script after the recipe.
    #[serde(default)]
    pub video_script: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerationResponse {
    pub prompt: String,
    pub result: String,
    pub phase: Phase,
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/generate",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Recipe generated from the current selection", body = GenerationResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 502, description = "Generation failed; previous result kept", body = ErrorResponse)
    )
)]
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let session = find_session(&state, id)?;
    let mut session = session.lock().await;

    session.set_flags(PromptFlags {
        chef_mode: request.chef_mode,
        video_script: request.video_script,
    });
    let result = session.generate(&*state.provider).await?.to_string();

    Ok(Json(GenerationResponse {
        prompt: session.last_prompt().unwrap_or_default().to_string(),
        result,
        phase: session.phase().into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/regenerate",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Recipe generated again from the last prompt", body = GenerationResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "Nothing generated yet", body = ErrorResponse),
        (status = 502, description = "Generation failed; previous result kept", body = ErrorResponse)
    )
)]
pub async fn regenerate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let session = find_session(&state, id)?;
    let mut session = session.lock().await;

    let result = session.regenerate(&*state.provider).await?.to_string();

    Ok(Json(GenerationResponse {
        prompt: session.last_prompt().unwrap_or_default().to_string(),
        result,
        phase: session.phase().into(),
    }))
}
