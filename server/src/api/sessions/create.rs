use super::SessionResponse;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "sessions",
    responses(
        (status = 201, description = "Session created", body = SessionResponse)
    )
)]
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let (id, session) = state.sessions.create(state.params.clone());
    let session = session.lock().await;
    (StatusCode::CREATED, Json(SessionResponse::new(id, &session)))
}
