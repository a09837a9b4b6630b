//! Environment-driven settings for the CLI.

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_LOG_FILE_PATH: &str = "logs/artifact_fetch.log";

/// Settings read from the process environment (after `.env` is loaded).
///
/// - `ARTIFACT_BASE_URL`: base for relative artifact locations
/// - `ARTIFACT_COOKIE`: cookie string the default request headers come from
/// - `LOG_FILE_PATH`: where the JSON log is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Option<Url>,
    pub cookie: String,
    pub log_file_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("ARTIFACT_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| parse_base_url(&v))
            .transpose()?;

        Ok(Self {
            base_url,
            cookie: lookup("ARTIFACT_COOKIE").unwrap_or_default(),
            log_file_path: lookup("LOG_FILE_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
        })
    }
}

/// Parses a base URL, adding the trailing slash needed for relative joins
/// to keep the last path segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).with_context(|| format!("invalid base URL '{raw}'"))
}
