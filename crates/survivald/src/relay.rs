//! Scorer relay - forwards score requests to the external prediction service.
//!
//! The relay adds the bearer credential and hands the scorer's JSON back
//! untouched. No retries; a failed call is terminal for that request.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::IgnoredAny;
use serde_json::json;
use std::time::Duration;
use survival_common::config::ScorerConfig;
use survival_common::form::http_error_message;
use survival_common::{PredictionRequest, ScoreRequest, ScoreResponse, ScoredLabel, SurvivalError};
use thiserror::Error;
use tracing::{debug, warn};

/// Message used when a failure carries nothing more specific
pub const UNKNOWN_ERROR: &str = "Unknown error.";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Backend error: {status_text}")]
    Upstream { status: u16, status_text: String },

    #[error("Scorer unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Scorer returned invalid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Request body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("Unexpected scorer response: {0}")]
    Response(#[from] SurvivalError),

    #[error("Scorer token is not configured (set SURVIVAL_SCORER_TOKEN)")]
    MissingToken,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RelayError {
    /// What a form sees when this failure reaches it through the relay.
    ///
    /// Relay-side failures all surface as a 500; only a reply the form
    /// itself cannot read keeps its own message.
    pub fn form_message(&self) -> String {
        match self {
            RelayError::Response(e) => e.to_string(),
            _ => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                http_error_message(status.as_u16(), status.canonical_reason())
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error_response(self.to_string())
    }
}

/// `500 { "error": message }`
pub fn error_response(message: impl Into<String>) -> Response {
    let message = message.into();
    let message = if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// HTTP client for the external scorer
pub struct ScorerClient {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl ScorerClient {
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("survivald/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RelayError::Client)?;

        Ok(Self {
            http,
            url: url.into(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &ScorerConfig) -> Result<Self, RelayError> {
        let token = config.token.as_deref().ok_or(RelayError::MissingToken)?;
        Self::new(
            config.url.clone(),
            token,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `body` to the scorer as-is and return its reply bytes, which
    /// are checked to be JSON but otherwise untouched.
    pub async fn forward(&self, body: Bytes) -> Result<Bytes, RelayError> {
        debug!("Forwarding {} bytes to {}", body.len(), self.url);

        let response = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.token)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!("Scorer request failed: {}", e);
                RelayError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string();
            warn!("Scorer answered {} {}", status.as_u16(), status_text);
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                status_text,
            });
        }

        let reply = response.bytes().await.map_err(RelayError::Transport)?;
        serde_json::from_slice::<IgnoredAny>(&reply).map_err(RelayError::Decode)?;
        Ok(reply)
    }

    /// Score one row and pull out its label.
    pub async fn score(&self, row: PredictionRequest) -> Result<ScoredLabel, RelayError> {
        let body = serde_json::to_vec(&ScoreRequest::single(row)).map_err(SurvivalError::Json)?;
        let reply = self.forward(Bytes::from(body)).await?;
        let response: ScoreResponse =
            serde_json::from_slice(&reply).map_err(SurvivalError::Json)?;
        Ok(response.scored_label()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survival_common::Config;

    #[test]
    fn test_upstream_error_message_carries_status_text() {
        let err = RelayError::Upstream {
            status: 502,
            status_text: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "Backend error: Bad Gateway");
    }

    #[tokio::test]
    async fn test_blank_message_falls_back_to_generic() {
        let response = error_response("  ");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], UNKNOWN_ERROR);
    }

    #[test]
    fn test_form_message_matches_relay_status() {
        let upstream = RelayError::Upstream {
            status: 401,
            status_text: "Unauthorized".into(),
        };
        assert_eq!(upstream.form_message(), "Error: 500 Internal Server Error");

        let shape = RelayError::Response(SurvivalError::MissingLabel);
        assert_eq!(shape.form_message(), SurvivalError::MissingLabel.to_string());
    }

    #[test]
    fn test_from_config_requires_token() {
        let config = Config::default();
        assert!(matches!(
            ScorerClient::from_config(&config.scorer),
            Err(RelayError::MissingToken)
        ));
    }

    #[test]
    fn test_from_config_with_token() {
        let mut config = Config::default();
        config.scorer.token = Some("t0ken".into());
        let client = ScorerClient::from_config(&config.scorer).unwrap();
        assert_eq!(client.url(), "http://localhost:8080/score");
    }
}
