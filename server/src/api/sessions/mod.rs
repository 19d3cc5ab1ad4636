pub mod create;
pub mod delete;
pub mod export;
pub mod generate;
pub mod get;
pub mod preferences;
pub mod saved;
pub mod selection;

use crate::state::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use recipace_core::{Session, SessionPhase};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/sessions endpoints (mounted at /api/sessions)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_session))
        .route("/{id}", get(get::get_session).delete(delete::delete_session))
        .route("/{id}/selection", put(selection::update_selection))
        .route("/{id}/generate", post(generate::generate))
        .route("/{id}/regenerate", post(generate::regenerate))
        .route("/{id}/save", post(saved::save_recipe))
        .route("/{id}/saved", get(saved::list_saved))
        .route("/{id}/saved/{n}/txt", get(saved::download_saved))
        .route("/{id}/preferences", put(preferences::update_preferences))
        .route("/{id}/convert", post(preferences::convert_units))
        .route("/{id}/export/txt", get(export::export_txt))
        .route("/{id}/export/docx", get(export::export_docx))
        .route("/{id}/share", get(export::share))
}

/// Wire form of `SessionPhase`. The core crate has no utoipa dependency, so
/// the schema lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Empty,
    HasResult,
    SavedAppended,
}

impl From<SessionPhase> for Phase {
    fn from(phase: SessionPhase) -> Self {
        match phase {
            SessionPhase::Empty => Phase::Empty,
            SessionPhase::HasResult => Phase::HasResult,
            SessionPhase::SavedAppended => Phase::SavedAppended,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SelectedValue {
    pub name: String,
    pub value: String,
}

/// Snapshot of a session's state.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub phase: Phase,
    /// Every parameter with its current value, in display order.
    pub selection: Vec<SelectedValue>,
    pub chef_mode: bool,
    pub video_script: bool,
    /// Prompt the next generate would send.
    pub prompt_preview: String,
    pub result: Option<String>,
    /// Prompt that produced `result`; what regenerate resends.
    pub last_prompt: Option<String>,
    pub unit_system: String,
    pub rating: u8,
    pub saved_count: usize,
}

impl SessionResponse {
    pub fn new(id: Uuid, session: &Session) -> Self {
        let flags = session.flags();
        Self {
            id,
            phase: session.phase().into(),
            selection: session
                .selection()
                .iter()
                .map(|(name, value)| SelectedValue {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            chef_mode: flags.chef_mode,
            video_script: flags.video_script,
            prompt_preview: session.prompt_preview(),
            result: session.result().map(str::to_string),
            last_prompt: session.last_prompt().map(str::to_string),
            unit_system: session.unit_system().to_string(),
            rating: session.rating().value(),
            saved_count: session.saved().len(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_session,
        get::get_session,
        delete::delete_session,
        selection::update_selection,
        generate::generate,
        generate::regenerate,
        saved::save_recipe,
        saved::list_saved,
        saved::download_saved,
        preferences::update_preferences,
        preferences::convert_units,
        export::export_txt,
        export::export_docx,
        export::share,
    ),
    components(schemas(
        Phase,
        SelectedValue,
        SessionResponse,
        selection::UpdateSelectionRequest,
        generate::GenerateRequest,
        generate::GenerationResponse,
        saved::SaveResponse,
        saved::SavedRecipe,
        saved::SavedListResponse,
        preferences::PreferencesRequest,
        preferences::PreferencesResponse,
        preferences::ConvertResponse,
        export::ShareResponse,
    ))
)]
pub struct ApiDoc;
