use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reaction_translator::api::ApiServer;
use reaction_translator::language::lookup_key;
use reaction_translator::{Config, LanguageMap};

/// Reaction Translator - translate Slack messages when someone reacts with a flag
#[derive(Parser)]
#[command(name = "reaction-translator", version, about)]
struct Cli {
    /// Port to listen on (overrides PORT and the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Config file (default: ~/.config/reaction-translator/config.toml)
    #[arg(short, long, env = "TRANSLATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show which language an emoji resolves to
    Resolve {
        /// Emoji name without colons (e.g. "flag-jp" or "fr")
        emoji: String,

        /// Language overlay file to apply on top of the built-in table
        #[arg(long)]
        language_map: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,reaction_translator=info",
        1 => "info,reaction_translator=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(Command::Resolve {
        emoji,
        language_map,
    }) = cli.command
    {
        return resolve(&emoji, language_map.as_deref());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::debug!(?config, "loaded configuration");

    tracing::info!(
        port = config.server.port,
        project = %config.translate.project_id,
        location = %config.translate.location,
        max_jitter_ms = config.pipeline.max_jitter.as_millis(),
        "starting reaction translator"
    );

    ApiServer::from_config(&config)?.run().await?;

    Ok(())
}

/// Print the language an emoji maps to
fn resolve(emoji: &str, language_map: Option<&Path>) -> anyhow::Result<()> {
    let languages = match language_map {
        Some(path) => LanguageMap::load_overlay(path)?,
        None => LanguageMap::builtin(),
    };

    let emoji = emoji.trim_matches(':');
    match languages.resolve(emoji) {
        Some(language) => println!("{emoji} -> {language}"),
        None => {
            anyhow::bail!("{emoji} (key {:?}) is not mapped to a language", lookup_key(emoji));
        }
    }

    Ok(())
}
