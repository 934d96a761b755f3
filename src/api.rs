use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::AppConfig;
use crate::constants::service;
use crate::engine::generate_analysis;
use crate::error::{ApiError, ValidationError};
use crate::schemas::{AnalysisRequest, AnalysisResponse, RawAnalysisRequest};

pub struct AppState {
    pub config: AppConfig,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .with_state(state)
}

pub async fn run_server(state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(state.config.bind_target()).await?;
    info!("API Server listening on {}", listener.local_addr()?);
    let app = router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn service_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "name": service::NAME,
        "description": service::DESCRIPTION,
        "version": service::VERSION,
        "uptime_secs": state.started_at.elapsed().as_secs(),
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn analyze(
    payload: Result<Json<RawAnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(raw) = payload.map_err(reject_body)?;
    let request = AnalysisRequest::try_from(raw)?;
    info!(instrument = request.query(), mode = %request.mode(), "Analysis requested");

    let response = generate_analysis(&request);
    response
        .validate()
        .map_err(|e| ApiError::Internal(format!("assembled response invalid: {}", e)))?;

    Ok(Json(response))
}

fn reject_body(rejection: JsonRejection) -> ApiError {
    match rejection {
        // Well-formed JSON whose fields have the wrong types
        JsonRejection::JsonDataError(err) => {
            ValidationError::new("body", err.body_text()).into()
        }
        other => ApiError::MalformedBody {
            status: other.status(),
            message: other.body_text(),
        },
    }
}
