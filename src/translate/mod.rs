//! Translation provider integration

mod auth;
mod google;

use async_trait::async_trait;

pub use auth::{CredentialSource, GoogleTokenProvider, METADATA_TOKEN_URL};
pub use google::{GoogleTranslator, TRANSLATE_API_URL, parent_path};

use crate::Result;

/// Output of one translation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Text in the target language
    pub translated_text: String,
}

/// Translates a single plain-text document
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language` (ISO 639-1)
    ///
    /// # Errors
    ///
    /// Returns error on quota, unsupported language or network failure
    async fn translate(&self, text: &str, target_language: &str) -> Result<TranslationResult>;
}
