//! Wire envelopes exchanged with the external scorer.
//!
//! The scorer speaks a fixed batch format: one `Inputs.input1` array on the
//! way in, one `Results.WebServiceOutput0` array on the way out. The form only
//! ever sends a single row.

use crate::error::{Result, SurvivalError};
use crate::scoring::trailing_number;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient sex as the scorer encodes it (`0` male, `1` female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn code(self) -> u8 {
        match self {
            Sex::Male => 0,
            Sex::Female => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl From<Sex> for u8 {
    fn from(sex: Sex) -> u8 {
        sex.code()
    }
}

impl TryFrom<u8> for Sex {
    type Error = SurvivalError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Sex::Male),
            1 => Ok(Sex::Female),
            other => Err(SurvivalError::InvalidSex(other.to_string())),
        }
    }
}

impl FromStr for Sex {
    type Err = SurvivalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0" => Ok(Sex::Male),
            "1" => Ok(Sex::Female),
            other => Err(SurvivalError::InvalidSex(other.to_string())),
        }
    }
}

/// One row of scorer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub age_years: i64,
    #[serde(rename = "sex_0male_1female")]
    pub sex: Sex,
    pub episode_number: i64,
}

/// `{ "Inputs": { "input1": [ ... ] } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(rename = "Inputs")]
    pub inputs: ScoreInputs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub input1: Vec<PredictionRequest>,
}

impl ScoreRequest {
    pub fn single(row: PredictionRequest) -> Self {
        Self {
            inputs: ScoreInputs { input1: vec![row] },
        }
    }
}

/// `{ "Results": { "WebServiceOutput0": [ ... ] } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(rename = "Results")]
    pub results: ScoreResults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResults {
    #[serde(rename = "WebServiceOutput0")]
    pub output: Vec<ScoredRow>,
}

/// Output row. The scorer echoes the inputs next to the label; those are
/// kept untyped since nothing downstream reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow {
    #[serde(rename = "Scored Labels")]
    pub scored_label: ScoredLabel,
    #[serde(flatten)]
    pub echoed: serde_json::Map<String, serde_json::Value>,
}

impl ScoreResponse {
    /// Label of the first output row.
    pub fn scored_label(&self) -> Result<&ScoredLabel> {
        self.results
            .output
            .first()
            .map(|row| &row.scored_label)
            .ok_or(SurvivalError::MissingLabel)
    }
}

/// The scorer's raw output, normally a JSON number in `[0, 1]`.
///
/// Some deployments emit the label as a string instead. Those are read by
/// taking the trailing numeric run, falling back to `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoredLabel {
    Number(f64),
    Text(String),
}

impl ScoredLabel {
    pub fn value(&self) -> f64 {
        match self {
            ScoredLabel::Number(n) => *n,
            ScoredLabel::Text(text) => trailing_number(text).unwrap_or(0.0),
        }
    }
}

impl fmt::Display for ScoredLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoredLabel::Number(n) => write!(f, "{}", n),
            ScoredLabel::Text(text) => f.write_str(text),
        }
    }
}
