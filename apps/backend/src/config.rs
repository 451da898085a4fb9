//! Server configuration read from the environment.

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime configuration.
///
/// Env vars:
/// - HOST: Bind address (default "0.0.0.0")
/// - PORT: Bind port (default 3000)
/// - UPLOAD_DIR: Directory holding uploaded decks (default "uploads")
/// - DEFAULT_DECK: Outline file to activate at startup (optional)
/// - MAX_UPLOAD_BYTES: Upload body limit (default 5 MiB)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub default_deck: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            default_deck: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => parse_var("PORT", value)?,
            None => defaults.port,
        };
        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => parse_var("MAX_UPLOAD_BYTES", value)?,
            None => defaults.max_upload_bytes,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            default_deck: lookup("DEFAULT_DECK")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            max_upload_bytes,
        })
    }

    /// Socket address string, e.g. `0.0.0.0:3000`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
