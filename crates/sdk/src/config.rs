//! Configuration types for the publisher client.

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Public endpoint of the Android Publisher v3 API.
pub const DEFAULT_BASE_URL: &str = "https://androidpublisher.googleapis.com/androidpublisher/v3/";

/// The single OAuth scope requested for service-account credentials.
pub const PUBLISHER_SCOPE: &str = "https://www.googleapis.com/auth/androidpublisher";

/// Environment variable the server reads the key file path from.
pub const SERVICE_ACCOUNT_KEY_ENV: &str = "GOOGLE_SERVICE_ACCOUNT_KEY";

/// Where the client obtains its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Path to a Google Cloud service account JSON key file.
    ServiceAccountKey(PathBuf),
    /// A pre-issued OAuth access token.
    AccessToken(String),
}

/// Configuration for the publisher client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the publishing API, ending in `/`.
    pub base_url: Url,
    /// Credential used to authorize every request.
    pub credentials: CredentialSource,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration against the public endpoint.
    pub fn new(credentials: CredentialSource) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            credentials,
            timeout: Duration::from_secs(30),
            user_agent: default_user_agent(),
        }
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("play-publisher/{}", env!("CARGO_PKG_VERSION"))
}
