use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Parameter {
    pub name: String,
    /// Allowed values; the first is always "None".
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParametersResponse {
    pub parameters: Vec<Parameter>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/parameters", get(list_parameters))
}

#[utoipa::path(
    get,
    path = "/api/parameters",
    tag = "parameters",
    responses(
        (status = 200, description = "Recipe parameters in display order", body = ParametersResponse)
    )
)]
pub async fn list_parameters(State(state): State<AppState>) -> Json<ParametersResponse> {
    let parameters = state
        .params
        .iter()
        .map(|(name, options)| Parameter {
            name: name.to_string(),
            options: options.to_vec(),
        })
        .collect();

    Json(ParametersResponse { parameters })
}

#[derive(OpenApi)]
#[openapi(
    paths(list_parameters),
    components(schemas(Parameter, ParametersResponse))
)]
pub struct ApiDoc;
