//! Reply composition and posting

use crate::slack::{Reply, ReplyAttachment, ReplyPoster, ThreadMessage};

/// Label used when a message cannot be translated
pub const UNSUPPORTED_NOTICE: &str = "_Sorry, the language is not supported!_";

/// Build the reply for a reaction on `original`
///
/// A message with text and a translation gets the translation as body and its
/// own text as footer. Anything else gets the bodyless "not supported" notice.
#[must_use]
pub fn compose_reply(
    original: &ThreadMessage,
    translated_text: Option<&str>,
    language: &str,
    channel_id: &str,
    emoji_name: &str,
) -> Reply {
    let attachment = match (original.text(), translated_text) {
        (Some(text), Some(translated)) => ReplyAttachment {
            preceding_label: format!("_The message is translated in_ :{emoji_name}: _({language})_"),
            body_text: Some(translated.to_string()),
            footer_text: Some(text.to_string()),
        },
        _ => ReplyAttachment {
            preceding_label: UNSUPPORTED_NOTICE.to_string(),
            body_text: None,
            footer_text: None,
        },
    };

    Reply {
        channel_id: channel_id.to_string(),
        thread_ts: original.thread_anchor().to_string(),
        attachment,
    }
}

/// Compose and post the reply, logging instead of failing
///
/// Returns whether the post succeeded.
pub async fn post_translation(
    poster: &dyn ReplyPoster,
    original: &ThreadMessage,
    translated_text: Option<&str>,
    language: &str,
    channel_id: &str,
    emoji_name: &str,
) -> bool {
    let reply = compose_reply(original, translated_text, language, channel_id, emoji_name);

    match poster.post_reply(&reply).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(
                error = %e,
                channel = %reply.channel_id,
                thread_ts = %reply.thread_ts,
                "failed to post translation"
            );
            false
        }
    }
}
