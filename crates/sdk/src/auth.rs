//! Credential loading and OAuth access-token exchange.
//!
//! Service-account keys are only read when the first request needs a token,
//! so a bad key surfaces as an [`PublisherError::Authentication`] at first use
//! rather than at client construction.

use crate::config::{CredentialSource, PUBLISHER_SCOPE};
use crate::error::{PublisherError, PublisherResult};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Fields of a Google Cloud service account key file that the exchange needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Read and parse a key file.
    pub async fn from_file(path: &Path) -> PublisherResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            PublisherError::Authentication(format!(
                "failed to read service account key {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&raw)
    }

    /// Parse key material from its JSON text.
    pub fn from_json(raw: &str) -> PublisherResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            PublisherError::Authentication(format!("malformed service account key: {}", e))
        })
    }

    /// Sign an RS256 assertion scoped to the publishing API.
    pub fn assertion(&self) -> PublisherResult<String> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: PUBLISHER_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes()).map_err(|e| {
            PublisherError::Authentication(format!("invalid service account private key: {}", e))
        })?;

        jsonwebtoken::encode(&header, &claims, &key).map_err(|e| {
            PublisherError::Authentication(format!("failed to sign assertion: {}", e))
        })
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Resolves a [`CredentialSource`] into a bearer token, memoizing it for the
/// lifetime of one client.
#[derive(Debug)]
pub(crate) struct Authenticator {
    source: CredentialSource,
    token: Mutex<Option<String>>,
}

impl Authenticator {
    pub(crate) fn new(source: CredentialSource) -> Self {
        Self {
            source,
            token: Mutex::new(None),
        }
    }

    /// Return a bearer token, exchanging the service account key on first use.
    pub(crate) async fn access_token(&self, http: &reqwest::Client) -> PublisherResult<String> {
        let path = match &self.source {
            CredentialSource::AccessToken(token) => return Ok(token.clone()),
            CredentialSource::ServiceAccountKey(path) => path,
        };

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let key = ServiceAccountKey::from_file(path).await?;
        let token = exchange(http, &key).await?;
        *cached = Some(token.clone());
        Ok(token)
    }
}

async fn exchange(http: &reqwest::Client, key: &ServiceAccountKey) -> PublisherResult<String> {
    let assertion = key.assertion()?;
    debug!(token_uri = %key.token_uri, client = %key.client_email, "Exchanging service account assertion");

    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await
        .map_err(|e| PublisherError::Authentication(format!("token request failed: {}", e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PublisherError::Authentication(format!("token response unreadable: {}", e)))?;

    if !status.is_success() {
        let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(err) => match err.error_description {
                Some(description) => format!("{}: {}", err.error, description),
                None => err.error,
            },
            Err(_) => body,
        };
        return Err(PublisherError::Authentication(format!(
            "token endpoint returned {}: {}",
            status.as_u16(),
            reason
        )));
    }

    let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
        PublisherError::Authentication(format!("unexpected token response: {}", e))
    })?;
    Ok(token.access_token)
}
