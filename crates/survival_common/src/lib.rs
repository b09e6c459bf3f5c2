//! Survival Common - shared types for the survival score relay and form.
//!
//! Wire envelopes for the external scorer, score bucketing, form draft
//! handling, and configuration.

pub mod config;
pub mod envelope;
pub mod error;
pub mod form;
pub mod scoring;

pub use config::Config;
pub use envelope::{PredictionRequest, ScoreRequest, ScoreResponse, ScoredLabel, Sex};
pub use error::{Result, SurvivalError};
pub use form::{Field, FormDraft, FormResult};
pub use scoring::{Assessment, Bucket, Gradient, Score};
