//! Terminal rendering of form outcomes.

use crate::form::FormClient;
use owo_colors::OwoColorize;
use serde_json::json;
use survival_common::{Bucket, FormResult};

/// Whether stdout can take ANSI colors
pub fn colors_enabled() -> bool {
    console::Term::stdout().features().colors_supported()
}

fn paint(text: &str, bucket: Bucket, colors: bool) -> String {
    if !colors {
        return text.to_string();
    }
    match bucket {
        Bucket::LowSurvival => text.red().bold().to_string(),
        Bucket::Moderate => text.yellow().bold().to_string(),
        Bucket::Favorable => text.green().bold().to_string(),
    }
}

pub fn render_result(result: &FormResult, colors: bool) -> String {
    let assessment = &result.assessment;
    let headline = format!("{}  {}", assessment.icon, assessment.score);

    format!(
        "{}\n{}\n{}",
        result.display_text(),
        paint(&headline, assessment.bucket, colors),
        paint(&assessment.message, assessment.bucket, colors),
    )
}

pub fn render_error(message: &str, colors: bool) -> String {
    if colors {
        message.red().bold().to_string()
    } else {
        message.to_string()
    }
}

/// Human-readable outcome of the last submission, if any.
pub fn render(client: &FormClient, colors: bool) -> Option<String> {
    if let Some(result) = client.result() {
        Some(render_result(result, colors))
    } else {
        client.error().map(|e| render_error(e, colors))
    }
}

/// Machine-readable outcome for `--json`
pub fn render_json(client: &FormClient) -> serde_json::Value {
    match (client.result(), client.error()) {
        (Some(result), _) => json!({ "result": result }),
        (None, Some(error)) => json!({ "error": error }),
        (None, None) => json!({}),
    }
}
