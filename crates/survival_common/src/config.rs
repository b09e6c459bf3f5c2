//! Configuration management for survivald and survivalctl.
//!
//! Settings come from /etc/survival/config.toml (or an explicit path), then
//! environment overrides. The scorer token is only ever read from the
//! environment.

use crate::error::{Result, SurvivalError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/survival/config.toml";

pub const ENV_SCORER_TOKEN: &str = "SURVIVAL_SCORER_TOKEN";
pub const ENV_SCORER_URL: &str = "SURVIVAL_SCORER_URL";
pub const ENV_BIND: &str = "SURVIVAL_BIND";
pub const ENV_RELAY_URL: &str = "SURVIVAL_RELAY_URL";

/// Where survivalctl sends its requests unless told otherwise
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000/api/score";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the relay and form page
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// External scorer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    #[serde(default = "default_scorer_url")]
    pub url: String,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token, from SURVIVAL_SCORER_TOKEN only
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_scorer_url() -> String {
    "http://localhost:8080/score".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            url: default_scorer_url(),
            timeout_secs: default_timeout(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub scorer: ScorerConfig,
}

impl Config {
    /// Load from `path` if given, else from [`CONFIG_PATH`] when present,
    /// else defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None if Path::new(CONFIG_PATH).exists() => {
                Self::load_from_path(Path::new(CONFIG_PATH))?
            }
            None => {
                warn!("No config at {}, using defaults", CONFIG_PATH);
                Config::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from an environment lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = var(ENV_SCORER_URL) {
            self.scorer.url = url;
        }
        if let Some(bind) = var(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(token) = var(ENV_SCORER_TOKEN) {
            self.scorer.token = Some(token);
        }
    }

    /// The scorer token; the relay refuses to start without one.
    pub fn scorer_token(&self) -> Result<&str> {
        self.scorer.token.as_deref().ok_or_else(|| {
            SurvivalError::Config(format!("{} is not set", ENV_SCORER_TOKEN))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.scorer.timeout_secs, 30);
        assert!(config.scorer.token.is_none());
        assert!(config.scorer_token().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scorer]\nurl = \"http://scorer.internal/score\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.scorer.url, "http://scorer.internal/score");
        assert_eq!(config.scorer.timeout_secs, 30);
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_token_in_file_is_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scorer]\ntoken = \"from-file\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert!(config.scorer.token.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(env(&[
            (ENV_SCORER_URL, "http://other/score"),
            (ENV_BIND, "0.0.0.0:8000"),
            (ENV_SCORER_TOKEN, "secret"),
        ]));

        assert_eq!(config.scorer.url, "http://other/score");
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert_eq!(config.scorer_token().unwrap(), "secret");
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let mut config = Config::default();
        config.apply_env(env(&[(ENV_SCORER_TOKEN, "  "), (ENV_BIND, "")]));

        assert!(config.scorer.token.is_none());
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scorer\nurl = ").unwrap();

        assert!(matches!(
            Config::load_from_path(file.path()),
            Err(SurvivalError::Toml(_))
        ));
    }
}
