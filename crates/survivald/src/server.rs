//! HTTP server for survivald

use crate::relay::{error_response, ScorerClient, UNKNOWN_ERROR};
use crate::routes;
use anyhow::{Context, Result};
use axum::response::Response;
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Application state shared across handlers
pub struct AppState {
    pub scorer: ScorerClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(scorer: ScorerClient) -> Self {
        Self {
            scorer,
            start_time: Instant::now(),
        }
    }
}

/// A handler panic still answers `500 { "error": ... }`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()));
    error!("Handler panicked: {}", detail.as_deref().unwrap_or("<non-string payload>"));
    error_response(UNKNOWN_ERROR)
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::relay_routes())
        .merge(routes::page_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState, addr: &str) -> Result<()> {
    info!("  Relaying {} -> {}", routes::SCORE_PATH, state.scorer.url());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_panic_response_is_generic_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], UNKNOWN_ERROR);
    }
}
