//! Google OAuth access tokens for Cloud Translation
//!
//! Credentials are discovered the way Google client libraries do it: a service
//! account key file named by `GOOGLE_APPLICATION_CREDENTIALS` is exchanged for
//! a token with a signed JWT; without one, the GCE/Cloud Run metadata server
//! hands out tokens for the attached service account.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{Error, Result};

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const TOKEN_SCOPE: &str = "https://www.googleapis.com/auth/cloud-translation";

/// Default metadata server token endpoint
pub const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Refresh tokens this long before they expire (seconds)
const EXPIRY_MARGIN_SECS: i64 = 300;

/// Lifetime requested for self-signed JWT assertions (seconds)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Where access tokens come from
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Service account key file
    ServiceAccountFile(PathBuf),
    /// Instance metadata server
    MetadataServer {
        /// Token endpoint URL
        url: String,
    },
    /// Pre-issued access token (e.g. `gcloud auth print-access-token`)
    Static(SecretString),
}

impl CredentialSource {
    /// Pick a source: an explicit key file wins, then the metadata server
    #[must_use]
    pub fn discover(service_account_path: Option<PathBuf>) -> Self {
        match service_account_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "using service account credentials");
                Self::ServiceAccountFile(path)
            }
            None => {
                tracing::info!("no service account file, using metadata server credentials");
                Self::MetadataServer {
                    url: METADATA_TOKEN_URL.to_string(),
                }
            }
        }
    }
}

/// Service account JSON structure
#[derive(Debug, Deserialize)]
struct ServiceAccount {
    client_email: String,
    private_key: String,
    token_uri: Option<String>,
}

/// JWT claims for Google OAuth
#[derive(Debug, Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

/// Token response from Google
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Cached token info
struct TokenInfo {
    access_token: String,
    expires_at: i64,
}

/// Issues and caches access tokens for one credential source
pub struct GoogleTokenProvider {
    source: CredentialSource,
    client: reqwest::Client,
    cached: Mutex<Option<TokenInfo>>,
}

impl std::fmt::Debug for GoogleTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTokenProvider")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl GoogleTokenProvider {
    /// Create a provider for `source`
    #[must_use]
    pub fn new(source: CredentialSource) -> Self {
        Self {
            source,
            client: reqwest::Client::new(),
            cached: Mutex::new(None),
        }
    }

    /// Get a valid access token, refreshing it if needed
    ///
    /// # Errors
    ///
    /// Returns error if credentials cannot be loaded or the exchange fails
    pub async fn access_token(&self) -> Result<String> {
        let now = chrono::Utc::now().timestamp();

        let mut cached = self.cached.lock().await;
        if let Some(info) = cached.as_ref() {
            if info.expires_at > now + EXPIRY_MARGIN_SECS {
                return Ok(info.access_token.clone());
            }
        }

        let response = match &self.source {
            CredentialSource::ServiceAccountFile(path) => {
                self.exchange_service_account(path, now).await?
            }
            CredentialSource::MetadataServer { url } => self.fetch_from_metadata(url).await?,
            CredentialSource::Static(token) => return Ok(token.expose_secret().to_string()),
        };

        tracing::debug!(expires_in = response.expires_in, "refreshed Google access token");

        *cached = Some(TokenInfo {
            access_token: response.access_token.clone(),
            expires_at: now + response.expires_in,
        });

        Ok(response.access_token)
    }

    async fn exchange_service_account(&self, path: &Path, now: i64) -> Result<TokenResponse> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Credentials(format!(
                "failed to read service account {}: {e}",
                path.display()
            ))
        })?;
        let account: ServiceAccount = serde_json::from_str(&content)
            .map_err(|e| Error::Credentials(format!("failed to parse service account: {e}")))?;

        let token_url = account.token_uri.as_deref().unwrap_or(GOOGLE_TOKEN_URL);
        let jwt = create_jwt(&account, token_url, now)?;

        let response = self
            .client
            .post(token_url)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", jwt.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Credentials(format!("token request failed: {e}")))?;

        parse_token_response(response).await
    }

    async fn fetch_from_metadata(&self, url: &str) -> Result<TokenResponse> {
        let response = self
            .client
            .get(url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| Error::Credentials(format!("metadata server request failed: {e}")))?;

        parse_token_response(response).await
    }
}

/// Create the signed JWT assertion for a token request
fn create_jwt(account: &ServiceAccount, audience: &str, now: i64) -> Result<String> {
    use jsonwebtoken::{Algorithm, EncodingKey, Header};

    let header = Header::new(Algorithm::RS256);
    let claims = JwtClaims {
        iss: &account.client_email,
        scope: TOKEN_SCOPE,
        aud: audience,
        exp: now + ASSERTION_LIFETIME_SECS,
        iat: now,
    };

    let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
        .map_err(|e| Error::Credentials(format!("invalid private key: {e}")))?;

    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| Error::Credentials(format!("JWT encoding failed: {e}")))
}

async fn parse_token_response(response: reqwest::Response) -> Result<TokenResponse> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Credentials(format!(
            "token request failed: {status} - {body}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| Error::Credentials(format!("token parse error: {e}")))
}
