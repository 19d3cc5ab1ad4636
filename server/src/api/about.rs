use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

const SUMMARY: &str = "Recipace-AI is an all-in-one cooking companion for YouTube creators.";

const FEATURES: [&str; 6] = [
    "30+ customizable parameters, from cuisine style to spice level",
    "Rich step-by-step guides with chef tips and common mistakes",
    "Extras included: grocery lists, timers, nutrition facts and substitutions",
    "Optional video script with intro, narration and outro",
    "Scaling and conversion between Imperial and Metric",
    "Save and download as plain text or a Word document",
];

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AboutResponse {
    pub name: String,
    pub summary: String,
    pub features: Vec<String>,
    /// Model used for generation.
    pub model: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/about", get(about))
}

#[utoipa::path(
    get,
    path = "/api/about",
    tag = "about",
    responses(
        (status = 200, description = "Application overview", body = AboutResponse)
    )
)]
pub async fn about(State(state): State<AppState>) -> Json<AboutResponse> {
    Json(AboutResponse {
        name: "Recipace-AI".to_string(),
        summary: SUMMARY.to_string(),
        features: FEATURES.iter().map(|f| f.to_string()).collect(),
        model: state.provider.model_name().to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(paths(about), components(schemas(AboutResponse)))]
pub struct ApiDoc;
