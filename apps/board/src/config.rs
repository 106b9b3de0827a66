use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};

/// en-US style, matching what browsers show for a local timestamp.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every key has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub timestamp_format: String,
    /// Job file ingested once at startup, as if uploaded through the page.
    pub seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            seed_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: match lookup("PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => defaults.max_upload_bytes,
            },
            timestamp_format: match lookup("TIMESTAMP_FORMAT") {
                Some(v) => check_timestamp_format(v).context("TIMESTAMP_FORMAT is invalid")?,
                None => defaults.timestamp_format,
            },
            seed_file: lookup("JOB_BOARD_SEED_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

/// Rejects strftime patterns chrono cannot format.
fn check_timestamp_format(pattern: String) -> Result<String> {
    if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
        bail!("unsupported strftime pattern {pattern:?}");
    }
    Ok(pattern)
}
