//! Configuration management for the reaction translator
//!
//! Precedence: environment variables > TOML file > defaults. The resulting
//! [`Config`] is read-only for the life of the process.

pub mod file;

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;

use crate::language::LanguageMap;
use crate::pipeline::DEFAULT_MAX_JITTER;
use crate::slack::SLACK_API_URL;
use crate::translate::{CredentialSource, TRANSLATE_API_URL};
use crate::{Error, Result};

use self::file::TranslatorConfigFile;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Default display name for posted replies
pub const DEFAULT_BOT_NAME: &str = "Reaction Translator";

/// Default Cloud Translation location
pub const DEFAULT_LOCATION: &str = "global";

/// Hard ceiling for the start jitter, kept well below hosting timeouts
pub const MAX_JITTER_CEILING: Duration = Duration::from_secs(60);

/// Reaction translator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Slack app settings
    pub slack: SlackConfig,

    /// Cloud Translation settings
    pub translate: TranslateConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Pipeline tuning
    pub pipeline: PipelineConfig,
}

/// Slack app configuration
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Bot OAuth token (xoxb-...)
    pub bot_token: SecretString,

    /// Request signing secret (`None` only when verification is disabled)
    pub signing_secret: Option<SecretString>,

    /// Verify inbound request signatures
    pub verify_signatures: bool,

    /// Web API base URL
    pub api_url: String,

    /// Display name replies are posted under
    pub bot_name: String,

    /// `limit` sent to `conversations.replies`
    pub thread_limit: u32,
}

/// Cloud Translation configuration
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Cloud project ID
    pub project_id: String,

    /// Translation location
    pub location: String,

    /// Service account key file (`GOOGLE_APPLICATION_CREDENTIALS`)
    pub credentials: Option<PathBuf>,

    /// Pre-issued access token, bypassing credential discovery
    pub access_token: Option<SecretString>,

    /// Translation API base URL
    pub api_url: String,
}

impl TranslateConfig {
    /// Where access tokens should come from
    #[must_use]
    pub fn credential_source(&self) -> CredentialSource {
        self.access_token.clone().map_or_else(
            || CredentialSource::discover(self.credentials.clone()),
            CredentialSource::Static,
        )
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound of the random start delay
    pub max_jitter: Duration,

    /// TOML file overlaying the built-in emoji table
    pub language_map: Option<PathBuf>,
}

impl PipelineConfig {
    /// Build the emoji table: built-in, plus the overlay file if configured
    ///
    /// # Errors
    ///
    /// Returns error if the overlay file cannot be loaded
    pub fn languages(&self) -> Result<LanguageMap> {
        self.language_map
            .as_deref()
            .map_or_else(|| Ok(LanguageMap::builtin()), LanguageMap::load_overlay)
    }
}

impl Config {
    /// Load configuration from the environment and a config file
    ///
    /// `config_path` overrides the standard file location; an explicit path
    /// that cannot be read is an error, a missing standard file is not.
    ///
    /// # Errors
    ///
    /// Returns error if required settings are missing or invalid
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let fc = match config_path {
            Some(path) => file::read_config_file(path)?,
            None => file::load_config_file(),
        };

        Self::from_sources(|key| std::env::var(key).ok(), fc)
    }

    /// Build configuration from an environment lookup and a parsed file
    ///
    /// # Errors
    ///
    /// Returns error if required settings are missing or invalid
    pub fn from_sources<F>(env: F, fc: TranslatorConfigFile) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = env("SLACK_BOT_TOKEN")
            .or(fc.slack.bot_token)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Config("SLACK_BOT_TOKEN is required".to_string()))?;

        let verify_signatures = match env("TRANSLATOR_VERIFY_SIGNATURES") {
            Some(v) => Some(parse_bool("TRANSLATOR_VERIFY_SIGNATURES", &v)?),
            None => fc.slack.verify_signatures,
        }
        .unwrap_or(true);

        let signing_secret = env("SLACK_SIGNING_SECRET")
            .or(fc.slack.signing_secret)
            .filter(|s| !s.is_empty());

        if verify_signatures && signing_secret.is_none() {
            return Err(Error::Config(
                "SLACK_SIGNING_SECRET is required unless signature verification is disabled"
                    .to_string(),
            ));
        }

        let thread_limit = match env("SLACK_THREAD_LIMIT") {
            Some(v) => Some(parse_number::<u32>("SLACK_THREAD_LIMIT", &v)?),
            None => fc.slack.thread_limit,
        }
        .unwrap_or(1);

        if thread_limit == 0 {
            return Err(Error::Config("SLACK_THREAD_LIMIT must be at least 1".to_string()));
        }

        let slack = SlackConfig {
            bot_token: SecretString::from(bot_token),
            signing_secret: signing_secret.map(SecretString::from),
            verify_signatures,
            api_url: env("SLACK_API_URL")
                .or(fc.slack.api_url)
                .unwrap_or_else(|| SLACK_API_URL.to_string()),
            bot_name: env("TRANSLATOR_BOT_NAME")
                .or(fc.slack.bot_name)
                .unwrap_or_else(|| DEFAULT_BOT_NAME.to_string()),
            thread_limit,
        };

        let project_id = env("GOOGLE_CLOUD_PROJECT")
            .or(fc.google.project_id)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Config("GOOGLE_CLOUD_PROJECT is required".to_string()))?;

        let translate = TranslateConfig {
            project_id,
            location: env("GOOGLE_CLOUD_LOCATION")
                .or(fc.google.location)
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            credentials: env("GOOGLE_APPLICATION_CREDENTIALS")
                .map(PathBuf::from)
                .or(fc.google.credentials),
            access_token: env("GOOGLE_ACCESS_TOKEN").map(SecretString::from),
            api_url: env("TRANSLATE_API_URL")
                .or(fc.google.api_url)
                .unwrap_or_else(|| TRANSLATE_API_URL.to_string()),
        };

        let port = match env("PORT") {
            Some(v) => Some(parse_number::<u16>("PORT", &v)?),
            None => fc.server.port,
        }
        .unwrap_or(DEFAULT_PORT);

        let max_jitter = match env("TRANSLATOR_MAX_JITTER_MS") {
            Some(v) => Some(parse_number::<u64>("TRANSLATOR_MAX_JITTER_MS", &v)?),
            None => fc.translator.max_jitter_ms,
        }
        .map_or(DEFAULT_MAX_JITTER, Duration::from_millis);

        if max_jitter > MAX_JITTER_CEILING {
            tracing::warn!(
                requested_ms = max_jitter.as_millis(),
                ceiling_ms = MAX_JITTER_CEILING.as_millis(),
                "start jitter capped"
            );
        }

        let pipeline = PipelineConfig {
            max_jitter: max_jitter.min(MAX_JITTER_CEILING),
            language_map: env("TRANSLATOR_LANGUAGE_MAP")
                .map(PathBuf::from)
                .or(fc.translator.language_map),
        };

        Ok(Self {
            slack,
            translate,
            server: ServerConfig { port },
            pipeline,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(Error::Config(format!(
            "{key} must be true or false, got {value:?}"
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be a number, got {value:?}")))
}
