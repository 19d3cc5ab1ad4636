mod api;
mod state;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use recipace_core::{create_provider, AppConfig, ParameterSet};
use state::{AppContext, AppState, DEFAULT_SESSION_TTL};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const BIND_ADDR_VAR: &str = "RECIPACE_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const SESSION_TTL_VAR: &str = "RECIPACE_SESSION_TTL_SECS";

fn session_ttl_from_env() -> anyhow::Result<Duration> {
    match env::var(SESSION_TTL_VAR) {
        Ok(secs) => {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of seconds", SESSION_TTL_VAR))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(DEFAULT_SESSION_TTL),
    }
}

fn init_telemetry() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the application with request tracing.
fn app(state: AppState) -> Router {
    api::router().with_state(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &Span| {
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request failed with server error"
                        );
                    } else {
                        tracing::info!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    }
                },
            )
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: std::time::Duration,
                 _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("Failed to serialize OpenAPI spec")?;
        println!("{}", spec);
        return Ok(());
    }

    dotenvy::dotenv().ok();
    init_telemetry();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let params = ParameterSet::load(&config.params_path).with_context(|| {
        format!(
            "Failed to load parameters from {}",
            config.params_path.display()
        )
    })?;
    let provider = create_provider(&config).context("Failed to create generation provider")?;

    let session_ttl = session_ttl_from_env()?;
    tracing::info!(ttl_secs = session_ttl.as_secs(), "Session expiry configured");

    let state: AppState = Arc::new(AppContext::new(params, Arc::from(provider), session_ttl));

    let bind_addr = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}
