//! Shared configuration for the Sensorium dashboard.
//!
//! Layering, lowest precedence first: built-in defaults, the TOML config
//! file, `SENSORIUM_`-prefixed environment variables. CLI flags layer on
//! top in the binary. Validation happens once, in
//! [`Config::to_poller_config`], and returns typed errors.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use sensorium_core::PollerConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no endpoint configured (set `endpoint` in the config file, SENSORIUM_ENDPOINT, or --endpoint)")]
    NoEndpoint,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Dashboard configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Station data endpoint URL (e.g., "http://192.168.141.172:8080/data_endpoint").
    pub endpoint: Option<String>,

    /// Poll cadence in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log file path. Defaults in the binary to `/tmp/sensorium.log`.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: default_timeout_secs(),
            log_file: None,
        }
    }
}

// The station pushes a fresh sample roughly once a second.
fn default_poll_interval_ms() -> u64 {
    1_000
}
fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Validate and translate into a [`PollerConfig`].
    pub fn to_poller_config(&self) -> Result<PollerConfig, ConfigError> {
        let endpoint = self.endpoint.as_deref().ok_or(ConfigError::NoEndpoint)?;
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::Validation {
            field: "endpoint".into(),
            reason: e.to_string(),
        })?;

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "poll_interval_ms".into(),
                reason: "must be a positive integer".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "timeout_secs".into(),
                reason: "must be a positive integer".into(),
            });
        }

        Ok(PollerConfig {
            endpoint,
            interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

// ── Loading ─────────────────────────────────────────────────────────

/// Default config file path: `{config_dir}/sensorium/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "sensorium", "sensorium")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn base_figment(config_file: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = config_file {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed("SENSORIUM_"))
}

/// Load configuration from the default file location and environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();
    Ok(base_figment(path.as_deref()).extract()?)
}

/// Load configuration from an explicit file path and environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(base_figment(Some(path)).extract()?)
}
