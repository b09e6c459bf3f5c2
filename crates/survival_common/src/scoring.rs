//! Score derivation and display buckets.
//!
//! A scored label in `[0, 1]` becomes a percentage capped at 100, which then
//! falls into one of three buckets. Each bucket carries the gradient, message
//! and icon the form renders for it.

use crate::envelope::ScoredLabel;
use serde::Serialize;
use std::fmt;

/// Upper bound of the low-survival bucket (inclusive).
pub const LOW_SURVIVAL_MAX: f64 = 70.0;

/// Upper bound of the moderate bucket (inclusive).
pub const MODERATE_MAX: f64 = 90.0;

pub const MAX_SCORE: f64 = 100.0;

/// Percentage score, never above [`MAX_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub fn from_label(label: f64) -> Self {
        Self((label * 100.0).min(MAX_SCORE))
    }

    pub fn percent(self) -> f64 {
        self.0
    }

    pub fn bucket(self) -> Bucket {
        Bucket::for_score(self)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// Trailing run of digits and decimal points at the end of `text`, read the
/// way a lenient float parser would: `"1.2.3"` reads as `1.2`, a bare `"."`
/// reads as nothing. Trailing whitespace ends the run, so `"0.5\n"` has none.
pub fn trailing_number(text: &str) -> Option<f64> {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .last()
        .map(|(i, _)| i)?;
    let run = &text[start..];

    // Stop at the second decimal point
    let end = run
        .match_indices('.')
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(run.len());

    run[..end].parse::<f64>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    LowSurvival,
    Moderate,
    Favorable,
}

impl Bucket {
    pub fn for_score(score: Score) -> Self {
        let pct = score.percent();
        if pct <= LOW_SURVIVAL_MAX {
            Bucket::LowSurvival
        } else if pct <= MODERATE_MAX {
            Bucket::Moderate
        } else {
            Bucket::Favorable
        }
    }

    pub fn gradient(self) -> Gradient {
        match self {
            Bucket::LowSurvival => Gradient::RED,
            Bucket::Moderate => Gradient::AMBER,
            Bucket::Favorable => Gradient::GREEN,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Bucket::LowSurvival => "😢",
            Bucket::Moderate => "😐",
            Bucket::Favorable => "😊",
        }
    }

    pub fn message(self, score: Score) -> String {
        match self {
            Bucket::LowSurvival => format!(
                "Estimated survival probability of {}. This is a low-survival result; \
                 review the case with the care team before drawing conclusions.",
                score
            ),
            Bucket::Moderate => format!(
                "Estimated survival probability of {}. The outlook is moderate; \
                 continued monitoring is advised.",
                score
            ),
            Bucket::Favorable => format!(
                "Estimated survival probability of {}. The outlook is favorable.",
                score
            ),
        }
    }
}

/// Background gradient as a named token plus its two CSS stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub token: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

impl Gradient {
    /// Shown before any result exists.
    pub const IDLE: Gradient = Gradient {
        token: "purple-blue",
        from: "#c084fc",
        to: "#93c5fd",
    };
    pub const RED: Gradient = Gradient {
        token: "red",
        from: "#dc2626",
        to: "#f87171",
    };
    pub const AMBER: Gradient = Gradient {
        token: "yellow-orange",
        from: "#facc15",
        to: "#fb923c",
    };
    pub const GREEN: Gradient = Gradient {
        token: "green",
        from: "#4ade80",
        to: "#22c55e",
    };

    pub fn css(&self) -> String {
        format!("linear-gradient(to bottom right, {}, {})", self.from, self.to)
    }
}

/// Everything the form renders for one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub score: Score,
    pub bucket: Bucket,
    pub gradient: Gradient,
    pub icon: &'static str,
    pub message: String,
}

impl Assessment {
    pub fn from_score(score: Score) -> Self {
        let bucket = score.bucket();
        Self {
            score,
            bucket,
            gradient: bucket.gradient(),
            icon: bucket.icon(),
            message: bucket.message(score),
        }
    }

    pub fn from_label(label: &ScoredLabel) -> Self {
        Self::from_score(Score::from_label(label.value()))
    }
}
