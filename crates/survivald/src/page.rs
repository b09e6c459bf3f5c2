//! Server-rendered prediction form.
//!
//! `GET /` shows the empty form; `POST /` scores the submitted draft and
//! renders the same page with the result or the error underneath.

use survival_common::form::SEX_OPTIONS;
use survival_common::{Field, FormDraft, FormResult, Gradient};

/// What the page shows below the form
#[derive(Debug, Clone)]
pub enum Outcome {
    Idle,
    Scored(FormResult),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub draft: FormDraft,
    pub outcome: Outcome,
}

impl PageView {
    pub fn idle() -> Self {
        Self {
            draft: FormDraft::default(),
            outcome: Outcome::Idle,
        }
    }

    pub fn gradient(&self) -> Gradient {
        match &self.outcome {
            Outcome::Scored(result) => result.assessment.gradient,
            _ => Gradient::IDLE,
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn number_input(field: Field, draft: &FormDraft) -> String {
    format!(
        r#"<div class="field">
        <label for="{name}">{label}</label>
        <input type="number" name="{name}" id="{name}" value="{value}" required>
      </div>"#,
        name = field.name(),
        label = field.label(),
        value = escape_html(draft.get(field)),
    )
}

fn sex_select(draft: &FormDraft) -> String {
    let options: String = SEX_OPTIONS
        .iter()
        .map(|sex| {
            let code = sex.code().to_string();
            let selected = if draft.sex.trim() == code { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                code,
                selected,
                sex.label()
            )
        })
        .collect();

    format!(
        r#"<div class="field">
        <label for="{name}">{label}</label>
        <select id="{name}" name="{name}">{options}</select>
      </div>"#,
        name = Field::Sex.name(),
        label = Field::Sex.label(),
        options = options,
    )
}

fn outcome_block(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Idle => String::new(),
        Outcome::Scored(result) => format!(
            r#"<div class="result {bucket}">
        <p class="label">{text}</p>
        <p class="icon">{icon}</p>
        <p class="message">{message}</p>
      </div>"#,
            bucket = result.assessment.gradient.token,
            text = escape_html(&result.display_text()),
            icon = result.assessment.icon,
            message = escape_html(&result.assessment.message),
        ),
        Outcome::Failed(message) => {
            format!(r#"<p class="error">{}</p>"#, escape_html(message))
        }
    }
}

/// Render the full page
pub fn render(view: &PageView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Prediction Form</title>
  <style>
    body {{ margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center;
           font-family: system-ui, sans-serif; background: {background}; transition: background 0.7s; }}
    .card {{ width: 100%; max-width: 24rem; padding: 1.5rem; background: #fff; border-radius: 1rem;
            box-shadow: 0 10px 25px rgba(0, 0, 0, 0.15); }}
    h1 {{ text-align: center; color: #374151; font-size: 1.5rem; }}
    .field {{ margin-bottom: 1.25rem; }}
    label {{ display: block; margin-bottom: 0.5rem; font-size: 0.875rem; font-weight: 500; }}
    input, select {{ box-sizing: border-box; width: 100%; padding: 0.5rem 1rem; border: 1px solid #d1d5db;
                    border-radius: 0.5rem; background: #f9fafb; font-size: 1rem; }}
    button {{ width: 100%; padding: 0.5rem 1rem; color: #fff; background: #2563eb; border: 0;
             border-radius: 0.5rem; font-size: 1rem; cursor: pointer; }}
    .result, .error {{ margin-top: 1rem; text-align: center; font-weight: 600; }}
    .result .label {{ color: #16a34a; }}
    .result .icon {{ font-size: 2.5rem; margin: 0.25rem 0; }}
    .error {{ color: #dc2626; }}
  </style>
</head>
<body>
  <div class="card">
    <h1>Prediction Form</h1>
    <form method="post" action="/">
      {age}
      {sex}
      {episode}
      <button type="submit">Submit</button>
    </form>
    {outcome}
  </div>
</body>
</html>
"#,
        background = view.gradient().css(),
        age = number_input(Field::AgeYears, &view.draft),
        sex = sex_select(&view.draft),
        episode = number_input(Field::EpisodeNumber, &view.draft),
        outcome = outcome_block(&view.outcome),
    )
}
