//! Slack Events API and Web API payloads

use serde::{Deserialize, Serialize};

/// Top-level Events API request body
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackPayload {
    /// Endpoint ownership handshake sent when the request URL is configured
    UrlVerification {
        /// Value that must be echoed back
        challenge: String,
    },
    /// A subscribed workspace event
    EventCallback {
        /// The wrapped event, left raw until the request is authenticated
        #[serde(default)]
        event: serde_json::Value,
    },
    /// Anything else (`app_rate_limited`, unknown future types)
    #[serde(other)]
    Unknown,
}

/// Kind of the inner event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionEventKind {
    /// A reaction was added to an item
    ReactionAdded,
    /// Any other event type
    #[default]
    #[serde(other)]
    Other,
}

/// Kind of item a reaction was added to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    /// A message in a channel
    Message,
    /// Files, file comments and anything else
    #[default]
    #[serde(other)]
    Other,
}

/// The item a reaction points at
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReactionSubject {
    /// Item type
    #[serde(rename = "type", default)]
    pub kind: SubjectKind,
    /// Channel ID
    #[serde(rename = "channel", default)]
    pub channel_id: String,
    /// Message timestamp
    #[serde(rename = "ts", default)]
    pub timestamp: String,
}

/// A reaction event as delivered inside `event_callback`
///
/// Fields absent from non-reaction events fall back to their defaults so any
/// event shape deserializes; the dispatcher filters on `kind`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReactionEvent {
    /// Event type
    #[serde(rename = "type", default)]
    pub kind: ReactionEventKind,
    /// Reacting user
    #[serde(rename = "user", default)]
    pub user_id: String,
    /// Emoji name without colons (e.g. `flag-jp`)
    #[serde(rename = "reaction", default)]
    pub emoji_name: String,
    /// Reacted-to item
    #[serde(rename = "item", default)]
    pub subject: ReactionSubject,
}

impl ReactionEvent {
    /// Build a `reaction_added` event on a message
    #[must_use]
    pub fn reaction_added(
        user_id: impl Into<String>,
        emoji_name: impl Into<String>,
        channel_id: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            kind: ReactionEventKind::ReactionAdded,
            user_id: user_id.into(),
            emoji_name: emoji_name.into(),
            subject: ReactionSubject {
                kind: SubjectKind::Message,
                channel_id: channel_id.into(),
                timestamp: timestamp.into(),
            },
        }
    }

    /// Interpret a raw `event` object
    ///
    /// Returns `None` for event shapes that do not fit (e.g. `user_change`,
    /// where `user` is an object).
    #[must_use]
    pub fn from_value(event: serde_json::Value) -> Option<Self> {
        serde_json::from_value(event).ok()
    }

    /// Whether this is a reaction added to a message
    #[must_use]
    pub fn is_message_reaction(&self) -> bool {
        self.kind == ReactionEventKind::ReactionAdded && self.subject.kind == SubjectKind::Message
    }
}

/// One message of a thread, as the pipeline sees it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadMessage {
    /// Message text (absent for file-only messages)
    pub text: Option<String>,
    /// Message timestamp
    pub timestamp: String,
    /// Root timestamp when the message belongs to a thread
    pub thread_root_timestamp: Option<String>,
    /// Whether Slack marked the message with the bot-reply subtype
    pub is_reply_subtype: bool,
    /// Whether the message carries at least one attachment
    pub has_attachment: bool,
    /// Body text of the message's first attachment
    pub existing_attachment_text: Option<String>,
}

impl ThreadMessage {
    /// Text if present and non-empty
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Timestamp a reply to this message should be threaded under
    ///
    /// Thread replies anchor to their root; root messages anchor to themselves.
    #[must_use]
    pub fn thread_anchor(&self) -> &str {
        self.thread_root_timestamp
            .as_deref()
            .unwrap_or(&self.timestamp)
    }
}

/// Subtype Slack assigns to messages posted with a custom `username`
pub const BOT_MESSAGE_SUBTYPE: &str = "bot_message";

/// Message object returned by `conversations.replies`
#[derive(Debug, Clone, Deserialize)]
pub struct SlackMessage {
    /// Message text
    pub text: Option<String>,
    /// Message timestamp
    pub ts: String,
    /// Thread root timestamp
    pub thread_ts: Option<String>,
    /// Message subtype
    pub subtype: Option<String>,
    /// Legacy attachments
    #[serde(default)]
    pub attachments: Vec<SlackAttachment>,
}

/// Legacy attachment on a fetched message
#[derive(Debug, Clone, Deserialize)]
pub struct SlackAttachment {
    /// Attachment body
    pub text: Option<String>,
}

impl From<SlackMessage> for ThreadMessage {
    fn from(msg: SlackMessage) -> Self {
        let first_attachment = msg.attachments.into_iter().next();
        Self {
            is_reply_subtype: msg.subtype.as_deref() == Some(BOT_MESSAGE_SUBTYPE),
            has_attachment: first_attachment.is_some(),
            existing_attachment_text: first_attachment.and_then(|a| a.text),
            text: msg.text,
            timestamp: msg.ts,
            thread_root_timestamp: msg.thread_ts,
        }
    }
}

/// Attachment-style reply body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyAttachment {
    /// Label shown above the attachment
    #[serde(rename = "pretext")]
    pub preceding_label: String,
    /// Attachment body
    #[serde(rename = "text", skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
    /// Small print under the body
    #[serde(rename = "footer", skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
}

/// A threaded reply ready to post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Channel to post in
    pub channel_id: String,
    /// Thread root to post under
    pub thread_ts: String,
    /// The single attachment carried by the reply
    pub attachment: ReplyAttachment,
}
