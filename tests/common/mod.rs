//! Shared test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reaction_translator::pipeline::{Jitter, NoJitter};
use reaction_translator::{
    Dispatcher, Error, LanguageMap, Reply, ReplyPoster, Result, ThreadFetcher, ThreadMessage,
    TranslationResult, Translator,
};
use tokio::sync::Notify;

/// Thread fetcher returning a canned thread
#[derive(Default)]
pub struct MockFetcher {
    thread: Mutex<Vec<ThreadMessage>>,
    fail: bool,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl MockFetcher {
    pub fn with_thread(thread: Vec<ThreadMessage>) -> Self {
        Self {
            thread: Mutex::new(thread),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Append a message, as if Slack had stored a new reply
    pub fn push(&self, message: ThreadMessage) {
        self.thread.lock().unwrap().push(message);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ThreadFetcher for MockFetcher {
    async fn fetch_thread(&self, channel_id: &str, ts: &str) -> Result<Vec<ThreadMessage>> {
        self.calls
            .lock()
            .unwrap()
            .push((channel_id.to_string(), ts.to_string()));
        if self.fail {
            return Err(Error::Fetch("channel_not_found".to_string()));
        }
        Ok(self.thread.lock().unwrap().clone())
    }
}

/// Translator that prefixes the text with the target language
#[derive(Default)]
pub struct MockTranslator {
    canned: Option<String>,
    fail: bool,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl MockTranslator {
    /// Always answer with `text`
    pub fn returning(text: &str) -> Self {
        Self {
            canned: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<TranslationResult> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target_language.to_string()));
        if self.fail {
            return Err(Error::Translation("quota exceeded".to_string()));
        }
        let translated_text = self
            .canned
            .clone()
            .unwrap_or_else(|| format!("[{target_language}] {text}"));
        Ok(TranslationResult { translated_text })
    }
}

/// Poster recording every reply
#[derive(Default)]
pub struct MockPoster {
    fail: bool,
    pub posted: Mutex<Vec<Reply>>,
    notify: Notify,
}

impl MockPoster {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn posted(&self) -> Vec<Reply> {
        self.posted.lock().unwrap().clone()
    }

    /// Wait until at least one reply was attempted
    pub async fn wait_for_post(&self, timeout: Duration) -> bool {
        let notified = self.notify.notified();
        if !self.posted.lock().unwrap().is_empty() {
            return true;
        }
        tokio::time::timeout(timeout, notified).await.is_ok()
    }
}

#[async_trait]
impl ReplyPoster for MockPoster {
    async fn post_reply(&self, reply: &Reply) -> Result<()> {
        self.posted.lock().unwrap().push(reply.clone());
        self.notify.notify_waiters();
        if self.fail {
            return Err(Error::Post("not_in_channel".to_string()));
        }
        Ok(())
    }
}

/// Jitter that records, for every wait, how many fetches had already happened
pub struct RecordingJitter {
    fetcher: Arc<MockFetcher>,
    pub fetches_before_wait: Mutex<Vec<usize>>,
}

impl RecordingJitter {
    pub fn new(fetcher: Arc<MockFetcher>) -> Self {
        Self {
            fetcher,
            fetches_before_wait: Mutex::new(Vec::new()),
        }
    }

    pub fn wait_count(&self) -> usize {
        self.fetches_before_wait.lock().unwrap().len()
    }
}

#[async_trait]
impl Jitter for RecordingJitter {
    async fn wait(&self) {
        let fetches = self.fetcher.call_count();
        self.fetches_before_wait.lock().unwrap().push(fetches);
    }
}

/// Mocks wired into a dispatcher without start jitter
pub struct Harness {
    pub fetcher: Arc<MockFetcher>,
    pub translator: Arc<MockTranslator>,
    pub poster: Arc<MockPoster>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    pub fn new(fetcher: MockFetcher, translator: MockTranslator, poster: MockPoster) -> Self {
        let fetcher = Arc::new(fetcher);
        let translator = Arc::new(translator);
        let poster = Arc::new(poster);
        let dispatcher = Dispatcher::new(
            LanguageMap::builtin(),
            fetcher.clone(),
            translator.clone(),
            poster.clone(),
        )
        .with_jitter(Arc::new(NoJitter));

        Self {
            fetcher,
            translator,
            poster,
            dispatcher,
        }
    }

    /// Like [`Harness::new`], with a jitter that records its waits
    pub fn with_recording_jitter(
        fetcher: MockFetcher,
        translator: MockTranslator,
        poster: MockPoster,
    ) -> (Self, Arc<RecordingJitter>) {
        let mut harness = Self::new(fetcher, translator, poster);
        let jitter = Arc::new(RecordingJitter::new(harness.fetcher.clone()));
        harness.dispatcher = harness.dispatcher.clone().with_jitter(jitter.clone());
        (harness, jitter)
    }
}

/// A root message with text
pub fn root_message(text: &str, ts: &str) -> ThreadMessage {
    ThreadMessage {
        text: Some(text.to_string()),
        timestamp: ts.to_string(),
        ..ThreadMessage::default()
    }
}

/// A translation reply previously posted by the bot
pub fn bot_reply(body: Option<&str>, ts: &str, root_ts: &str) -> ThreadMessage {
    ThreadMessage {
        text: Some(String::new()),
        timestamp: ts.to_string(),
        thread_root_timestamp: Some(root_ts.to_string()),
        is_reply_subtype: true,
        has_attachment: true,
        existing_attachment_text: body.map(ToString::to_string),
    }
}

/// A bot post from another integration, plain text and no attachments
pub fn bot_message_without_attachment(text: &str, ts: &str) -> ThreadMessage {
    ThreadMessage {
        text: Some(text.to_string()),
        timestamp: ts.to_string(),
        is_reply_subtype: true,
        ..ThreadMessage::default()
    }
}

/// Turn a posted reply into the message Slack would store for it
pub fn stored_reply(reply: &Reply, ts: &str) -> ThreadMessage {
    bot_reply(reply.attachment.body_text.as_deref(), ts, &reply.thread_ts)
}
