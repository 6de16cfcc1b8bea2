//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file under the
//! user's config directory, then `FLAGQUIZ_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under `~/.config` holding the config file.
pub const CONFIG_DIR: &str = "flagquiz";
/// Config file name.
pub const CONFIG_FILE: &str = "config.toml";
/// Public endpoint serving country names with flag image URLs.
pub const DEFAULT_PROVIDER_URL: &str = "https://countriesnow.space/api/v0.1/countries/flag/images";
/// Seconds before the country request is abandoned.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Runtime configuration shared by the core and the terminal front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Endpoint returning the country/flag collection.
    pub provider_url: String,
    /// HTTP timeout for the one-shot country fetch.
    pub request_timeout_secs: u64,
    /// Directory holding persisted blobs such as the leaderboard.
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            data_dir: default_data_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path`, which may be missing.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("provider_url", defaults.provider_url)?
            .set_default(
                "request_timeout_secs",
                defaults.request_timeout_secs as i64,
            )?
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())?
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("FLAGQUIZ"))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid config in {}", path.display()))
    }
}

/// Location of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Default directory for persisted game data.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
}

/// Write a config file populated with defaults if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(config_path())
}

fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, render_default_config(&AppConfig::default())?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}

fn render_default_config(defaults: &AppConfig) -> Result<String> {
    let body = toml::to_string(defaults).context("failed to render default config")?;
    Ok(format!("# Flag quiz configuration\n{body}"))
}
