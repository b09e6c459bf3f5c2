//! API routes for survivald

use crate::page::{self, Outcome, PageView};
use crate::relay::RelayError;
use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use survival_common::{FormDraft, FormResult};
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

/// Path the form client posts to
pub const SCORE_PATH: &str = "/api/score";

// ============================================================================
// Relay Routes
// ============================================================================

pub fn relay_routes() -> Router<AppStateArc> {
    Router::new().route(
        SCORE_PATH,
        post(relay_score).fallback(method_not_allowed),
    )
}

/// Forward the body to the scorer and echo its JSON back byte for byte.
async fn relay_score(
    State(state): State<AppStateArc>,
    body: Bytes,
) -> Result<impl IntoResponse, RelayError> {
    // The body goes upstream untouched; it only has to be JSON.
    serde_json::from_slice::<IgnoredAny>(&body).map_err(RelayError::MalformedBody)?;

    let reply = state.scorer.forward(body).await.map_err(|e| {
        error!("Relay failed: {}", e);
        e
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], reply))
}

async fn method_not_allowed(method: Method) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        format!("Method {} Not Allowed", method),
    )
}

// ============================================================================
// Page Routes
// ============================================================================

pub fn page_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(show_form).post(submit_form))
}

async fn show_form() -> Html<String> {
    Html(page::render(&PageView::idle()))
}

async fn submit_form(
    State(state): State<AppStateArc>,
    Form(draft): Form<FormDraft>,
) -> Html<String> {
    let outcome = match draft.to_request() {
        Ok(row) => {
            info!(
                "Scoring age={} sex={} episode={}",
                row.age_years,
                row.sex.code(),
                row.episode_number
            );
            match state.scorer.score(row).await {
                Ok(label) => Outcome::Scored(FormResult::from_label(label)),
                Err(e) => {
                    error!("Form scoring failed: {}", e);
                    Outcome::Failed(e.form_message())
                }
            }
        }
        Err(e) => Outcome::Failed(e.to_string()),
    };

    Html(page::render(&PageView { draft, outcome }))
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
