//! TOML configuration file loading
//!
//! Supports `~/.config/reaction-translator/config.toml` as a persistent config
//! source. All fields are optional: the file is a partial overlay on top of
//! defaults, and environment variables win over it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct TranslatorConfigFile {
    /// Slack app settings
    #[serde(default)]
    pub slack: SlackFileConfig,

    /// Google Cloud Translation settings
    #[serde(default)]
    pub google: GoogleFileConfig,

    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,

    /// Pipeline tuning
    #[serde(default)]
    pub translator: TranslatorFileConfig,
}

/// Slack app configuration
#[derive(Debug, Default, Deserialize)]
pub struct SlackFileConfig {
    /// Bot OAuth token (xoxb-...)
    pub bot_token: Option<String>,

    /// Request signing secret
    pub signing_secret: Option<String>,

    /// Verify request signatures (default true)
    pub verify_signatures: Option<bool>,

    /// Web API base URL
    pub api_url: Option<String>,

    /// Display name replies are posted under
    pub bot_name: Option<String>,

    /// `limit` sent to `conversations.replies`
    pub thread_limit: Option<u32>,
}

/// Google Cloud configuration
#[derive(Debug, Default, Deserialize)]
pub struct GoogleFileConfig {
    /// Cloud project ID
    pub project_id: Option<String>,

    /// Translation location (e.g. "global", "us-central1")
    pub location: Option<String>,

    /// Service account key file
    pub credentials: Option<PathBuf>,

    /// Translation API base URL
    pub api_url: Option<String>,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// HTTP port
    pub port: Option<u16>,
}

/// Pipeline configuration
#[derive(Debug, Default, Deserialize)]
pub struct TranslatorFileConfig {
    /// Upper bound of the random start delay in milliseconds
    pub max_jitter_ms: Option<u64>,

    /// TOML file overlaying the built-in emoji table
    pub language_map: Option<PathBuf>,
}

/// Load the TOML config file from the standard path
///
/// Returns `TranslatorConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> TranslatorConfigFile {
    let Some(path) = config_file_path() else {
        return TranslatorConfigFile::default();
    };

    if !path.exists() {
        return TranslatorConfigFile::default();
    }

    match read_config_file(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load config file, using defaults"
            );
            TranslatorConfigFile::default()
        }
    }
}

/// Read and parse a config file at an explicit path
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML
pub fn read_config_file(path: &Path) -> Result<TranslatorConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read config file {}: {e}", path.display()))
    })?;
    let config = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Return the config file path: `~/.config/reaction-translator/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| {
        d.config_dir()
            .join("reaction-translator")
            .join("config.toml")
    })
}
