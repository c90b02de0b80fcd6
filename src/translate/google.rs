//! Google Cloud Translation (v3) client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::auth::GoogleTokenProvider;
use super::{TranslationResult, Translator};
use crate::{Error, Result};

/// Default Cloud Translation API base URL
pub const TRANSLATE_API_URL: &str = "https://translation.googleapis.com";

/// MIME type of the submitted text
const PLAIN_TEXT: &str = "text/plain";

/// `translateText` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateTextRequest<'a> {
    contents: [&'a str; 1],
    mime_type: &'static str,
    target_language_code: &'a str,
}

/// `translateText` response body
#[derive(Debug, Deserialize)]
struct TranslateTextResponse {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
    detected_language_code: Option<String>,
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    status: Option<String>,
}

/// Cloud Translation client bound to one project and location
#[derive(Debug)]
pub struct GoogleTranslator {
    parent: String,
    base_url: String,
    tokens: GoogleTokenProvider,
    client: reqwest::Client,
}

impl GoogleTranslator {
    /// Create a client for `projects/{project_id}/locations/{location}`
    #[must_use]
    pub fn new(project_id: &str, location: &str, tokens: GoogleTokenProvider) -> Self {
        Self {
            parent: parent_path(project_id, location),
            base_url: TRANSLATE_API_URL.to_string(),
            tokens,
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Build the `projects/{id}/locations/{location}` resource path
#[must_use]
pub fn parent_path(project_id: &str, location: &str) -> String {
    format!(
        "projects/{}/locations/{}",
        urlencoding::encode(project_id),
        urlencoding::encode(location)
    )
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<TranslationResult> {
        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| Error::Translation(format!("no access token: {e}")))?;

        let request = TranslateTextRequest {
            contents: [text],
            mime_type: PLAIN_TEXT,
            target_language_code: target_language,
        };

        let response = self
            .client
            .post(format!("{}/v3/{}:translateText", self.base_url, self.parent))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Translation(format!("translate request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body).map_or(body, |e| {
                format!(
                    "{}: {}",
                    e.error.status.unwrap_or_default(),
                    e.error.message
                )
            });
            return Err(Error::Translation(format!("{status} - {detail}")));
        }

        let result: TranslateTextResponse = response
            .json()
            .await
            .map_err(|e| Error::Translation(format!("translate parse error: {e}")))?;

        let translation = result
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| Error::Translation("response had no translations".to_string()))?;

        tracing::debug!(
            target = %target_language,
            detected = ?translation.detected_language_code,
            "translated message"
        );

        Ok(TranslationResult {
            translated_text: translation.translated_text,
        })
    }
}
