use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_SECRETS_PATH: &str = "secrets.toml";
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Application configuration loaded from environment variables.
/// A missing API key is not an error: the service starts locked instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub secrets_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

/// Shape of the secrets file. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct SecretsFile {
    #[serde(rename = "OPENAI_API_KEY")]
    openai_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let secrets_path = PathBuf::from(
            std::env::var("SECRETS_PATH").unwrap_or_else(|_| DEFAULT_SECRETS_PATH.to_string()),
        );

        Ok(Config {
            openai_api_key: resolve_api_key(std::env::var(API_KEY_VAR).ok(), &secrets_path),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            secrets_path,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

/// Picks the API key: environment value first, then the secrets file.
/// Blank values count as absent.
fn resolve_api_key(env_value: Option<String>, secrets_path: &Path) -> Option<String> {
    non_blank(env_value).or_else(|| non_blank(read_secrets_key(secrets_path)))
}

fn read_secrets_key(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<SecretsFile>(&raw) {
        Ok(secrets) => secrets.openai_api_key,
        Err(e) => {
            warn!("Ignoring unreadable secrets file {}: {e}", path.display());
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
