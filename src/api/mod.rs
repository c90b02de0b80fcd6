//! HTTP server for the reaction translator

pub mod health;
pub mod webhooks;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::pipeline::{Dispatcher, RandomJitter};
use crate::slack::{AcceptAll, RequestVerifier, SlackClient, SlackSignatureVerifier};
use crate::translate::{GoogleTokenProvider, GoogleTranslator};
use crate::{Error, Result};

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    /// Runs the pipeline for accepted events
    pub dispatcher: Dispatcher,
    /// Checks inbound request signatures
    pub verifier: Arc<dyn RequestVerifier>,
}

impl ApiState {
    /// Wire the Slack client, translator and language table from `config`
    ///
    /// # Errors
    ///
    /// Returns error if the language overlay cannot be loaded
    pub fn from_config(config: &Config) -> Result<Self> {
        let languages = config.pipeline.languages()?;
        tracing::info!(entries = languages.len(), "language table loaded");

        let slack = Arc::new(
            SlackClient::new(config.slack.bot_token.clone(), config.slack.bot_name.clone())
                .with_base_url(config.slack.api_url.clone())
                .with_thread_limit(config.slack.thread_limit),
        );

        let tokens = GoogleTokenProvider::new(config.translate.credential_source());
        let translator = Arc::new(
            GoogleTranslator::new(
                &config.translate.project_id,
                &config.translate.location,
                tokens,
            )
            .with_base_url(config.translate.api_url.clone()),
        );

        let dispatcher = Dispatcher::new(languages, slack.clone(), translator, slack)
            .with_jitter(Arc::new(RandomJitter::new(config.pipeline.max_jitter)));

        let verifier: Arc<dyn RequestVerifier> = match (
            config.slack.verify_signatures,
            config.slack.signing_secret.clone(),
        ) {
            (true, Some(secret)) => Arc::new(SlackSignatureVerifier::new(secret)),
            (true, None) => {
                return Err(Error::Config(
                    "signature verification enabled without a signing secret".to_string(),
                ));
            }
            (false, _) => {
                tracing::warn!("Slack signature verification disabled");
                Arc::new(AcceptAll)
            }
        };

        Ok(Self {
            dispatcher,
            verifier,
        })
    }
}

/// Build the router with all routes
pub fn router(state: ApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(webhooks::router(state))
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
}

/// API server
pub struct ApiServer {
    state: ApiState,
    port: u16,
}

impl ApiServer {
    /// Create a server for prepared state
    #[must_use]
    pub const fn new(state: ApiState, port: u16) -> Self {
        Self { state, port }
    }

    /// Create a server fully wired from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the state cannot be built
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ApiState::from_config(config)?, config.server.port))
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, router(self.state))
            .await
            .map_err(|e| Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
