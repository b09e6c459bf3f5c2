//! Form draft state shared by the terminal client and the HTML page.

use crate::envelope::{PredictionRequest, ScoredLabel, Sex};
use crate::error::{Result, SurvivalError};
use crate::scoring::Assessment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    AgeYears,
    Sex,
    EpisodeNumber,
}

impl Field {
    /// Wire and form-input name
    pub fn name(self) -> &'static str {
        match self {
            Field::AgeYears => "age_years",
            Field::Sex => "sex_0male_1female",
            Field::EpisodeNumber => "episode_number",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::AgeYears => "Age (years)",
            Field::Sex => "Sex",
            Field::EpisodeNumber => "Episode number",
        }
    }
}

/// Field values exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    #[serde(default)]
    pub age_years: String,
    #[serde(rename = "sex_0male_1female", default = "default_sex")]
    pub sex: String,
    #[serde(default)]
    pub episode_number: String,
}

fn default_sex() -> String {
    "0".to_string()
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            age_years: String::new(),
            sex: default_sex(),
            episode_number: String::new(),
        }
    }
}

impl FormDraft {
    /// Overwrite one field. No cross-field checks.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::AgeYears => self.age_years = value,
            Field::Sex => self.sex = value,
            Field::EpisodeNumber => self.episode_number = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::AgeYears => &self.age_years,
            Field::Sex => &self.sex,
            Field::EpisodeNumber => &self.episode_number,
        }
    }

    /// Coerce the draft into a scorer row. Fields must be present and whole
    /// numbers; ranges are not checked.
    pub fn to_request(&self) -> Result<PredictionRequest> {
        Ok(PredictionRequest {
            age_years: parse_integer(Field::AgeYears, &self.age_years)?,
            sex: required(Field::Sex, &self.sex)?.parse()?,
            episode_number: parse_integer(Field::EpisodeNumber, &self.episode_number)?,
        })
    }
}

fn required(field: Field, value: &str) -> Result<&str> {
    let value = value.trim();
    if value.is_empty() {
        Err(SurvivalError::MissingField(field.name()))
    } else {
        Ok(value)
    }
}

fn parse_integer(field: Field, value: &str) -> Result<i64> {
    required(field, value)?
        .parse::<i64>()
        .map_err(|_| SurvivalError::NotAnInteger {
            field: field.name(),
            value: value.to_string(),
        })
}

/// Sex choices offered by the fixed selector.
pub const SEX_OPTIONS: [Sex; 2] = [Sex::Male, Sex::Female];

/// A successful submission: the scorer's label and what it renders as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormResult {
    pub label: ScoredLabel,
    pub assessment: Assessment,
}

impl FormResult {
    pub fn from_label(label: ScoredLabel) -> Self {
        let assessment = Assessment::from_label(&label);
        Self { label, assessment }
    }

    /// Line shown under the form, e.g. `Scored Label: 0.95`
    pub fn display_text(&self) -> String {
        format!("Scored Label: {}", self.label)
    }
}

/// Error line for a non-2xx relay reply, e.g. `Error: 502 Bad Gateway`.
pub fn http_error_message(status: u16, reason: Option<&str>) -> String {
    format!("Error: {} {}", status, reason.unwrap_or(""))
        .trim_end()
        .to_string()
}
