//! HTTP transport layer for the publisher client.

use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::{PublisherError, PublisherResult};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::debug;

/// HTTP transport for making authorized API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
    auth: Arc<Authenticator>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> PublisherResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        let auth = Arc::new(Authenticator::new(config.credentials.clone()));

        Ok(Self {
            client,
            config,
            auth,
        })
    }

    /// Build a URL for the given path, relative to the API base.
    fn build_url(&self, path: &str) -> PublisherResult<url::Url> {
        self.config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(PublisherError::InvalidUrl)
    }

    /// Authorize and send a request, mapping non-success statuses to errors.
    ///
    /// Failures are returned as-is; nothing here retries.
    async fn execute(&self, request_builder: RequestBuilder) -> PublisherResult<Response> {
        let token = self.auth.access_token(&self.client).await?;
        let response = request_builder.bearer_auth(token).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "Request rejected by publishing API");
        Err(PublisherError::from_response(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> PublisherResult<T> {
        let bytes = response.bytes().await?;
        // Some list endpoints answer with an empty body when there is nothing to list.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_str("{}")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PublisherResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let response = self.execute(self.client.get(url)).await?;
        Self::decode(response).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> PublisherResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        let response = self.execute(self.client.get(url).query(query)).await?;
        Self::decode(response).await
    }

    /// Execute a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> PublisherResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self.execute(self.client.post(url).json(body)).await?;
        Self::decode(response).await
    }

    /// Execute a DELETE request without a response body.
    pub async fn delete_no_response(&self, path: &str) -> PublisherResult<()> {
        let url = self.build_url(path)?;
        debug!(url = %url, "DELETE request (no response)");

        self.execute(self.client.delete(url)).await?;
        Ok(())
    }
}
