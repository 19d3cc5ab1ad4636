pub mod about;
pub mod parameters;
pub mod sessions;


use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use recipace_core::{Session, SessionError};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler failure, rendered as an [`ErrorResponse`] with a matching status.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Upstream(String),
    Internal(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let message = err.to_string();
        match err {
            SessionError::NothingToRegenerate | SessionError::NoResult => {
                ApiError::Conflict(message)
            }
            SessionError::InvalidRating(_) | SessionError::Parameter(_) => {
                ApiError::BadRequest(message)
            }
            SessionError::Generation(_) => ApiError::Upstream(message),
            SessionError::Export(_) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
            ApiError::Upstream(m) => (StatusCode::BAD_GATEWAY, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };

        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %message, "Request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Look up a session or fail with 404.
pub fn find_session(state: &AppState, id: Uuid) -> Result<Arc<Mutex<Session>>, ApiError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))
}

/// All API routes, mounted at their full paths.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(parameters::router())
        .merge(about::router())
        .nest("/api/sessions", sessions::router())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Recipace-AI", description = "Recipe generation for food video creators"),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        parameters::ApiDoc::openapi(),
        about::ApiDoc::openapi(),
        sessions::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
