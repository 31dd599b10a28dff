//! Main client for the publishing API.

use crate::api::{EditsApi, OpenEdit, ReviewsApi};
use crate::config::{default_user_agent, ClientConfig, CredentialSource, DEFAULT_BASE_URL};
use crate::error::{PublisherError, PublisherResult};
use crate::transport::HttpTransport;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Client for the Google Play Developer API.
#[derive(Debug, Clone)]
pub struct PublisherClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl PublisherClient {
    /// Create a new client builder.
    pub fn builder() -> PublisherClientBuilder {
        PublisherClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> PublisherResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the edits API.
    pub fn edits(&self) -> EditsApi<'_> {
        EditsApi::new(self)
    }

    /// Get the reviews API.
    pub fn reviews(&self) -> ReviewsApi<'_> {
        ReviewsApi::new(self)
    }

    /// Open an edit for `package_name`, run `read` against it, and delete the
    /// edit exactly once however `read` finishes.
    ///
    /// A failed delete after successful reads fails the whole call. When the
    /// reads themselves failed, their error wins and the delete failure is
    /// only logged. If the returned future is dropped while `read` is still
    /// running, the delete is spawned onto the current runtime.
    pub async fn with_edit<T, F, Fut>(&self, package_name: &str, read: F) -> PublisherResult<T>
    where
        F: FnOnce(OpenEdit) -> Fut,
        Fut: Future<Output = PublisherResult<T>>,
    {
        let edit = self.edits().insert(package_name).await?;
        let mut guard = EditGuard {
            client: Some(self.clone()),
            edit: edit.clone(),
        };

        let outcome = read(edit.clone()).await;
        // From here the delete below is the only one issued
        guard.disarm();
        let cleanup = self.edits().delete(&edit).await;

        match (outcome, cleanup) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                warn!(
                    package = %edit.package_name,
                    edit_id = %edit.edit_id,
                    error = %cleanup_err,
                    "Failed to delete edit after read error"
                );
                Err(e)
            }
        }
    }
}

/// Deletes an edit in the background if the owning future is dropped early.
struct EditGuard {
    client: Option<PublisherClient>,
    edit: OpenEdit,
}

impl EditGuard {
    fn disarm(&mut self) {
        self.client = None;
    }
}

impl Drop for EditGuard {
    fn drop(&mut self) {
        let Some(client) = self.client.take() else {
            return;
        };
        let edit = self.edit.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = client.edits().delete(&edit).await {
                        warn!(
                            package = %edit.package_name,
                            edit_id = %edit.edit_id,
                            error = %e,
                            "Failed to delete abandoned edit"
                        );
                    }
                });
            }
            Err(_) => warn!(
                package = %edit.package_name,
                edit_id = %edit.edit_id,
                "No runtime available, edit left open"
            ),
        }
    }
}

/// Builder for creating a PublisherClient.
pub struct PublisherClientBuilder {
    base_url: Option<String>,
    credentials: Option<CredentialSource>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl PublisherClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            credentials: None,
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }

    /// Override the API base URL (defaults to the public v3 endpoint).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Authorize with a service account JSON key file.
    pub fn service_account_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials = Some(CredentialSource::ServiceAccountKey(path.into()));
        self
    }

    /// Authorize with an already-issued access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(CredentialSource::AccessToken(token.into()));
        self
    }

    /// Set the credential source directly.
    pub fn credentials(mut self, credentials: CredentialSource) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> PublisherResult<PublisherClient> {
        let credentials = self
            .credentials
            .ok_or_else(|| PublisherError::Config("credentials are required".to_string()))?;

        let mut base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        // Relative joins drop the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let config = ClientConfig {
            base_url,
            credentials,
            timeout: self.timeout,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
        };

        PublisherClient::from_config(config)
    }
}

impl Default for PublisherClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
