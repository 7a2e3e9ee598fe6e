use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use genai_integration::GeminiBackend;
use server_api::{generate_text, ApiContext};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ErrorResponse, GenerateRequest, GenerateResponse, GET_TASKS_ROUTE},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    if settings.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; generation requests will fail until it is provided");
    }

    let backend = GeminiBackend::new(settings.gemini_config());
    let state = AppState {
        api: ApiContext::new(Arc::new(backend)),
    };
    let app = build_router(Arc::new(state), settings.max_prompt_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, model = %settings.gemini_model, "prompt gateway listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_prompt_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(GET_TASKS_ROUTE, post(get_tasks))
        .layer(RequestBodyLimitLayer::new(max_prompt_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn get_tasks(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(req) = payload.map_err(rejection_response)?;
    let text = generate_text(&state.api, &req.prompt)
        .await
        .map_err(error_response)?;
    Ok(Json(GenerateResponse { text }))
}

fn error_response(err: ApiError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err.into()))
}

fn rejection_response(rejection: JsonRejection) -> (StatusCode, Json<ErrorResponse>) {
    warn!(%rejection, "rejecting malformed gettasks request");
    let status = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: rejection.body_text(),
        }),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
