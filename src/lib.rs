//! Reaction Translator - Slack reaction to translation bridge
//!
//! When someone reacts to a Slack message with a flag emoji, the message is
//! translated into that country's language and posted back into the thread.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              Slack Events API (webhook)              │
//! └────────────────────┬────────────────────────────────┘
//!                      │  url_verification / event_callback
//! ┌────────────────────▼────────────────────────────────┐
//! │                   Dispatcher                         │
//! │  resolve  │  jitter  │  fetch  │  translate  │ post │
//! └──────┬──────────────────┬────────────┬─────────────┘
//!        │                  │            │
//!   Language map      Slack Web API   Cloud Translation
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod slack;
pub mod translate;

pub use config::Config;
pub use error::{Error, Result};
pub use language::LanguageMap;
pub use pipeline::{Dispatcher, Outcome};
pub use slack::{ReactionEvent, Reply, ReplyPoster, ThreadFetcher, ThreadMessage};
pub use translate::{TranslationResult, Translator};
