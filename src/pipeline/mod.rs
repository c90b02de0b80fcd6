//! Reaction → translation pipeline
//!
//! One accepted reaction runs, strictly in order: language resolution, start
//! jitter, thread fetch, translation, duplicate check, reply post. Every
//! failure is logged and ends the pipeline; nothing propagates to the caller.

mod dedup;
mod jitter;
mod reply;

use std::sync::Arc;

pub use dedup::is_duplicate;
pub use jitter::{DEFAULT_MAX_JITTER, Jitter, NoJitter, RandomJitter};
pub use reply::{UNSUPPORTED_NOTICE, compose_reply, post_translation};

use crate::language::LanguageMap;
use crate::slack::{ReactionEvent, ReplyPoster, ThreadFetcher};
use crate::translate::Translator;

/// How the handling of one event ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a reaction added to a message
    Ignored,
    /// Emoji does not name a language
    Unresolved,
    /// Thread fetch failed
    FetchFailed,
    /// Slack returned no messages for the item
    MessageNotFound,
    /// Translation provider failed
    TranslationFailed,
    /// The same reply already exists in the thread
    DuplicateSuppressed,
    /// Reply posted
    Posted,
    /// Reply post failed
    PostFailed,
}

/// Orchestrates the pipeline for single reaction events
#[derive(Clone)]
pub struct Dispatcher {
    languages: LanguageMap,
    fetcher: Arc<dyn ThreadFetcher>,
    translator: Arc<dyn Translator>,
    poster: Arc<dyn ReplyPoster>,
    jitter: Arc<dyn Jitter>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("languages", &self.languages.len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher with the default random start jitter
    #[must_use]
    pub fn new(
        languages: LanguageMap,
        fetcher: Arc<dyn ThreadFetcher>,
        translator: Arc<dyn Translator>,
        poster: Arc<dyn ReplyPoster>,
    ) -> Self {
        Self {
            languages,
            fetcher,
            translator,
            poster,
            jitter: Arc::new(RandomJitter::default()),
        }
    }

    /// Replace the start jitter
    #[must_use]
    pub fn with_jitter(mut self, jitter: Arc<dyn Jitter>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Language table in use
    #[must_use]
    pub const fn languages(&self) -> &LanguageMap {
        &self.languages
    }

    /// Handle one reaction event end to end
    pub async fn handle(&self, event: &ReactionEvent) -> Outcome {
        if !event.is_message_reaction() {
            tracing::debug!(kind = ?event.kind, subject = ?event.subject.kind, "ignoring event");
            return Outcome::Ignored;
        }

        let emoji = event.emoji_name.as_str();
        let Some(language) = self.languages.resolve(emoji) else {
            tracing::debug!(emoji, "reaction is not a language");
            return Outcome::Unresolved;
        };

        let channel_id = event.subject.channel_id.as_str();
        let ts = event.subject.timestamp.as_str();

        tracing::info!(
            channel = %channel_id,
            ts = %ts,
            user = %event.user_id,
            emoji,
            lang = language,
            "translation requested"
        );

        self.jitter.wait().await;

        let thread = match self.fetcher.fetch_thread(channel_id, ts).await {
            Ok(thread) => thread,
            Err(e) => {
                tracing::error!(error = %e, channel = %channel_id, ts = %ts, "failed to fetch thread");
                return Outcome::FetchFailed;
            }
        };

        let Some(message) = thread.first() else {
            tracing::warn!(channel = %channel_id, ts = %ts, "no message found for reaction");
            return Outcome::MessageNotFound;
        };

        // File-only messages skip translation and get the unsupported notice
        let translated = match message.text() {
            Some(text) => match self.translator.translate(text, language).await {
                Ok(result) => Some(result.translated_text),
                Err(e) => {
                    tracing::error!(error = %e, lang = language, "failed to translate message");
                    return Outcome::TranslationFailed;
                }
            },
            None => None,
        };

        if is_duplicate(&thread, translated.as_deref()) {
            tracing::info!(channel = %channel_id, ts = %ts, lang = language, "translation already posted");
            return Outcome::DuplicateSuppressed;
        }

        let posted = post_translation(
            self.poster.as_ref(),
            message,
            translated.as_deref(),
            language,
            channel_id,
            emoji,
        )
        .await;

        if posted {
            Outcome::Posted
        } else {
            Outcome::PostFailed
        }
    }
}
