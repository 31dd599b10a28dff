// Per-invocation construction of the publishing API client

use play_publisher::{
    CredentialSource, PublisherClient, PublisherError, PublisherResult, SERVICE_ACCOUNT_KEY_ENV,
};
use std::path::PathBuf;
use std::time::Duration;

/// Settings the tools build their API client from.
///
/// The credential is injected here by the binary; nothing below reads
/// process environment.
#[derive(Debug, Clone)]
pub struct PublisherSettings {
    pub credentials: Option<CredentialSource>,
    pub api_base_url: Option<String>,
    pub timeout: Duration,
}

impl PublisherSettings {
    pub fn new(credentials: Option<CredentialSource>) -> Self {
        Self {
            credentials,
            api_base_url: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Settings backed by a service account key file, if a path was given.
    pub fn from_key_path(path: Option<PathBuf>) -> Self {
        Self::new(path.map(CredentialSource::ServiceAccountKey))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a fresh client for one tool invocation.
    ///
    /// Fails before any network call when no credential was configured. Key
    /// file problems surface later, at the first authorized request.
    pub fn client(&self) -> PublisherResult<PublisherClient> {
        let credentials = self.credentials.clone().ok_or_else(|| {
            PublisherError::Config(format!(
                "{} environment variable is required. Set it to the path of your Google Cloud service account JSON key file.",
                SERVICE_ACCOUNT_KEY_ENV
            ))
        })?;

        let mut builder = PublisherClient::builder()
            .credentials(credentials)
            .timeout(self.timeout)
            .user_agent(format!("play-console-mcp/{}", env!("CARGO_PKG_VERSION")));
        if let Some(url) = &self.api_base_url {
            builder = builder.base_url(url.clone());
        }
        builder.build()
    }
}
