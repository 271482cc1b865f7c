//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::state::AppState;
use mailguard_classifiers::Verdict;
use mailguard_core::Error;
use mailguard_pipeline::SuspiciousSentence;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .route("/analyze", post(analyze))
        .fallback(fallback)
        // The browser extension calls from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn render_metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}

/// Analysis request body
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    email_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum ResponseStatus {
    Success,
    Error,
}

/// Analysis response body
#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    overall_result: Verdict,
    suspicious_sentences: Vec<SuspiciousSentence>,
    highlighted_words: Vec<String>,
    status: ResponseStatus,
}

/// Main analysis handler
async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = uuid::Uuid::new_v4();
    info!(%request_id, chars = req.email_text.len(), "analyze request received");

    let report = state.pipeline.analyze(&req.email_text).await?;

    info!(
        %request_id,
        label = %report.overall.label,
        suspicious = report.suspicious_sentences.len(),
        trusted = report.trusted,
        downgraded = report.downgraded,
        "analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        overall_result: report.overall,
        suspicious_sentences: report.suspicious_sentences,
        highlighted_words: report.highlighted_words,
        status: ResponseStatus::Success,
    }))
}

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Error handling
struct AppError(Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.is_user_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self.0, "analysis failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = json!({
            "error": self.0.to_string(),
            "status": ResponseStatus::Error,
        });

        (status, Json(body)).into_response()
    }
}
