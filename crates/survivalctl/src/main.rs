//! Survival Control - terminal prediction form
//!
//! Collects age, sex and episode number, submits them to the survivald relay
//! and prints the bucketed result.

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use survival_common::config::{DEFAULT_RELAY_URL, ENV_RELAY_URL};
use survival_common::Field;
use survivalctl::display;
use survivalctl::form::FormClient;
use tracing_subscriber::EnvFilter;

// Version is embedded at build time
const VERSION: &str = env!("SURVIVAL_VERSION");

#[derive(Parser)]
#[command(name = "survivalctl")]
#[command(about = "Survival score prediction form", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Relay endpoint (falls back to SURVIVAL_RELAY_URL)
    #[arg(long)]
    relay_url: Option<String>,

    /// Age in years
    #[arg(long)]
    age: Option<String>,

    /// Sex: 0 = male, 1 = female
    #[arg(long)]
    sex: Option<String>,

    /// Episode number
    #[arg(long)]
    episode: Option<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

fn prompt(term: &Term, field: Field, hint: &str) -> Result<String> {
    term.write_str(&format!("{}{}: ", field.label(), hint))?;
    Ok(term.read_line()?.trim().to_string())
}

/// Ask for whatever was not given on the command line.
fn fill_missing(term: &Term, client: &mut FormClient, cli: &Cli) -> Result<()> {
    let given = [
        (Field::AgeYears, &cli.age),
        (Field::Sex, &cli.sex),
        (Field::EpisodeNumber, &cli.episode),
    ];

    for (field, value) in given {
        match value {
            Some(value) => client.update(field, value.clone()),
            None if term.is_term() => {
                let hint = if field == Field::Sex { " (0 = Male, 1 = Female) [0]" } else { "" };
                let answer = prompt(term, field, hint)?;
                // An empty sex answer keeps the preselected option
                if !(field == Field::Sex && answer.is_empty()) {
                    client.update(field, answer);
                }
            }
            None => {}
        }
    }
    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep stdout for the result; only warnings go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let relay_url = cli
        .relay_url
        .clone()
        .or_else(|| std::env::var(ENV_RELAY_URL).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());

    let mut client = FormClient::new(relay_url)?;
    let term = Term::stderr();
    fill_missing(&term, &mut client, &cli)?;

    let request = client.begin_submit().context("Form is incomplete")?;
    let pb = (!cli.json && term.is_term()).then(|| spinner(client.submit_label()));
    let outcome = client.send(&request).await;
    client.finish(outcome);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&display::render_json(&client))?);
    } else if let Some(text) = display::render(&client, display::colors_enabled()) {
        println!("{}", text);
    }

    if client.error().is_some() {
        bail!("Submission failed");
    }
    Ok(())
}
