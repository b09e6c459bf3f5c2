//! Form client - draft state and one-shot submission to the relay.
//!
//! Mirrors the web form: fields are held as typed strings, a submit clears
//! the previous outcome, and exactly one request is in flight at a time.
//! Failures are stored as messages, never retried.

use reqwest::Client;
use survival_common::form::http_error_message;
use survival_common::{
    Field, FormDraft, FormResult, ScoreRequest, ScoreResponse, ScoredLabel, SurvivalError,
};
use thiserror::Error;
use tracing::debug;

pub const SUBMIT_LABEL: &str = "Submit";
pub const PROCESSING_LABEL: &str = "Processing...";

#[derive(Debug, Error)]
pub enum FormError {
    /// The draft cannot be submitted; nothing was sent.
    #[error("{0}")]
    Invalid(#[from] SurvivalError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub struct FormClient {
    http: Client,
    relay_url: String,
    draft: FormDraft,
    result: Option<FormResult>,
    error: Option<String>,
    in_flight: bool,
}

impl FormClient {
    pub fn new(relay_url: impl Into<String>) -> Result<Self, FormError> {
        let http = Client::builder()
            .user_agent(concat!("survivalctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FormError::Client)?;

        Ok(Self {
            http,
            relay_url: relay_url.into(),
            draft: FormDraft::default(),
            result: None,
            error: None,
            in_flight: false,
        })
    }

    pub fn update(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn result(&self) -> Option<&FormResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Text of the submit control
    pub fn submit_label(&self) -> &'static str {
        if self.in_flight {
            PROCESSING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Validate the draft and enter the in-flight state.
    ///
    /// An invalid draft leaves all state untouched.
    pub fn begin_submit(&mut self) -> Result<ScoreRequest, FormError> {
        let row = self.draft.to_request()?;

        self.result = None;
        self.error = None;
        self.in_flight = true;

        Ok(ScoreRequest::single(row))
    }

    /// POST the envelope to the relay and read back the label.
    pub async fn send(&self, request: &ScoreRequest) -> Result<ScoredLabel, String> {
        debug!("Posting score request to {}", self.relay_url);

        let response = self
            .http
            .post(&self.relay_url)
            .json(request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error_message(status.as_u16(), status.canonical_reason()));
        }

        let body: ScoreResponse = response.json().await.map_err(|e| e.to_string())?;
        body.scored_label().cloned().map_err(|e| e.to_string())
    }

    /// Record the outcome and leave the in-flight state.
    pub fn finish(&mut self, outcome: Result<ScoredLabel, String>) {
        match outcome {
            Ok(label) => self.result = Some(FormResult::from_label(label)),
            Err(message) => self.error = Some(message),
        }
        self.in_flight = false;
    }

    /// Full submit cycle. Only an invalid draft is returned as an error;
    /// request failures end up in [`FormClient::error`].
    pub async fn submit(&mut self) -> Result<(), FormError> {
        let request = self.begin_submit()?;
        let outcome = self.send(&request).await;
        self.finish(outcome);
        Ok(())
    }
}
