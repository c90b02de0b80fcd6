//! Slack integration
//!
//! Events API payloads, the Web API client used to read threads and post
//! replies, and request signature verification.

mod client;
mod signature;
mod types;

use async_trait::async_trait;

pub use client::{SLACK_API_URL, SlackClient};
pub use signature::{
    AcceptAll, RequestVerifier, SIGNATURE_HEADER, SlackSignatureVerifier, TIMESTAMP_HEADER,
};
pub use types::{
    BOT_MESSAGE_SUBTYPE, ReactionEvent, ReactionEventKind, ReactionSubject, Reply,
    ReplyAttachment, SlackAttachment, SlackMessage, SlackPayload, SubjectKind, ThreadMessage,
};

use crate::Result;

/// Reads a message together with its thread
#[async_trait]
pub trait ThreadFetcher: Send + Sync {
    /// Fetch the message at `ts` in `channel_id` and its thread context
    ///
    /// Messages come back in the order Slack returns them, root first.
    ///
    /// # Errors
    ///
    /// Returns error on network failure or a malformed/unsuccessful response
    async fn fetch_thread(&self, channel_id: &str, ts: &str) -> Result<Vec<ThreadMessage>>;
}

/// Posts a threaded reply
#[async_trait]
pub trait ReplyPoster: Send + Sync {
    /// Post `reply` into its thread
    ///
    /// # Errors
    ///
    /// Returns error if the post request fails
    async fn post_reply(&self, reply: &Reply) -> Result<()>;
}
