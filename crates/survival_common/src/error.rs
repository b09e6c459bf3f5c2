//! Error types shared by the relay and the form client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurvivalError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} is not a whole number: {value:?}")]
    NotAnInteger { field: &'static str, value: String },

    #[error("Sex must be 0 (male) or 1 (female), got {0:?}")]
    InvalidSex(String),

    #[error("Scorer response has no scored label at Results.WebServiceOutput0[0]")]
    MissingLabel,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SurvivalError>;
