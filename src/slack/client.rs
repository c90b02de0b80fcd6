//! Slack Web API client
//!
//! Form-encoded calls to `conversations.replies` and `chat.postMessage`,
//! authenticated with the bot token in the request body.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::types::{Reply, SlackMessage, ThreadMessage};
use super::{ReplyPoster, ThreadFetcher};
use crate::{Error, Result};

/// Default Slack Web API base URL
pub const SLACK_API_URL: &str = "https://slack.com/api";

/// Slack API response wrapper
#[derive(Debug, Deserialize)]
struct SlackResponse<T> {
    ok: bool,
    error: Option<String>,
    #[serde(flatten)]
    data: Option<T>,
}

/// `conversations.replies` payload
#[derive(Debug, Deserialize)]
struct RepliesResponse {
    messages: Vec<SlackMessage>,
}

/// `chat.postMessage` payload
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    channel: Option<String>,
    ts: Option<String>,
}

/// Slack Web API client
#[derive(Debug, Clone)]
pub struct SlackClient {
    bot_token: SecretString,
    bot_name: String,
    base_url: String,
    thread_limit: u32,
    client: reqwest::Client,
}

impl SlackClient {
    /// Create a client against the public Slack API
    ///
    /// # Arguments
    ///
    /// * `bot_token` - Slack bot OAuth token (xoxb-...)
    /// * `bot_name` - Display name replies are posted under
    #[must_use]
    pub fn new(bot_token: SecretString, bot_name: impl Into<String>) -> Self {
        Self {
            bot_token,
            bot_name: bot_name.into(),
            base_url: SLACK_API_URL.to_string(),
            thread_limit: 1,
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the `limit` sent to `conversations.replies`
    #[must_use]
    pub const fn with_thread_limit(mut self, limit: u32) -> Self {
        self.thread_limit = limit;
        self
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }
}

#[async_trait]
impl ThreadFetcher for SlackClient {
    async fn fetch_thread(&self, channel_id: &str, ts: &str) -> Result<Vec<ThreadMessage>> {
        let limit = self.thread_limit.to_string();
        let response = self
            .client
            .post(self.url("conversations.replies"))
            .form(&[
                ("token", self.bot_token.expose_secret()),
                ("channel", channel_id),
                ("ts", ts),
                ("limit", limit.as_str()),
                ("inclusive", "true"),
            ])
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("Slack request failed: {e}")))?;

        let result: SlackResponse<RepliesResponse> = response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("Slack parse error: {e}")))?;

        if !result.ok {
            return Err(Error::Fetch(format!(
                "conversations.replies failed: {}",
                result.error.unwrap_or_default()
            )));
        }

        let data = result
            .data
            .ok_or_else(|| Error::Fetch("conversations.replies returned no messages".to_string()))?;

        tracing::debug!(
            channel = %channel_id,
            ts = %ts,
            count = data.messages.len(),
            "fetched thread"
        );

        Ok(data.messages.into_iter().map(ThreadMessage::from).collect())
    }
}

#[async_trait]
impl ReplyPoster for SlackClient {
    async fn post_reply(&self, reply: &Reply) -> Result<()> {
        let attachments = serde_json::to_string(&[&reply.attachment])?;

        let response = self
            .client
            .post(self.url("chat.postMessage"))
            .form(&[
                ("token", self.bot_token.expose_secret()),
                ("channel", reply.channel_id.as_str()),
                ("attachments", attachments.as_str()),
                ("as_user", "false"),
                ("username", self.bot_name.as_str()),
                ("thread_ts", reply.thread_ts.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Post(format!("Slack request failed: {e}")))?;

        let result: SlackResponse<PostMessageResponse> = response
            .json()
            .await
            .map_err(|e| Error::Post(format!("Slack parse error: {e}")))?;

        if !result.ok {
            return Err(Error::Post(format!(
                "chat.postMessage failed: {}",
                result.error.unwrap_or_default()
            )));
        }

        let data = result.data;
        tracing::info!(
            channel = ?data.as_ref().and_then(|d| d.channel.as_deref()),
            ts = ?data.as_ref().and_then(|d| d.ts.as_deref()),
            thread_ts = %reply.thread_ts,
            "translation posted"
        );

        Ok(())
    }
}
