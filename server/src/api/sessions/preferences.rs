use crate::api::{find_session, ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use recipace_core::UnitSystem;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PreferencesRequest {
    /// "Imperial" or "Metric" (case-insensitive).
    #[serde(default)]
    pub unit_system: Option<String>,
    /// Star rating from 1 to 5.
    #[serde(default)]
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PreferencesResponse {
    pub unit_system: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConvertResponse {
    pub unit_system: String,
    /// Converted recipe. The session's current recipe is unchanged.
    pub text: String,
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}/preferences",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = PreferencesRequest,
    responses(
        (status = 200, description = "Preferences updated", body = PreferencesResponse),
        (status = 400, description = "Unknown unit system or rating out of range; nothing changed", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PreferencesRequest>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let unit_system = request
        .unit_system
        .as_deref()
        .map(str::parse::<UnitSystem>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let session = find_session(&state, id)?;
    let mut session = session.lock().await;

    if let Some(rating) = request.rating {
        session.set_rating(rating)?;
    }
    if let Some(unit_system) = unit_system {
        session.set_unit_system(unit_system);
    }

    Ok(Json(PreferencesResponse {
        unit_system: session.unit_system().to_string(),
        rating: session.rating().value(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/convert",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Current recipe converted to the preferred unit system", body = ConvertResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "No recipe to convert", body = ErrorResponse),
        (status = 502, description = "Conversion failed", body = ErrorResponse)
    )
)]
pub async fn convert_units(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let session = find_session(&state, id)?;
    let session = session.lock().await;

    let text = session.convert_units(&*state.provider).await?;

    Ok(Json(ConvertResponse {
        unit_system: session.unit_system().to_string(),
        text,
    }))
}
