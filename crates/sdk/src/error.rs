//! Error types for the Play publisher client.

use serde::Deserialize;

/// Result type for publisher operations.
pub type PublisherResult<T> = Result<T, PublisherError>;

/// Error types that can occur when talking to the publishing API.
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Canonical status string from the error envelope, e.g. `NOT_FOUND`.
        reason: Option<String>,
    },

    /// Invalid or missing configuration.
    #[error("{0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credential could not be loaded or exchanged for an access token.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Local I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PublisherError {
    /// Create an API error from a status code and response body.
    ///
    /// Google APIs wrap failures in `{"error": {"code", "message", "status"}}`;
    /// anything else is relayed verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
            Self::Api {
                status,
                message: envelope.error.message,
                reason: envelope.error.status,
            }
        } else {
            let message = if body.trim().is_empty() {
                format!("request failed with status {}", status)
            } else {
                body.to_string()
            };
            Self::Api {
                status,
                message,
                reason: None,
            }
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the remote service rejected the caller's credentials or scope.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication(_)) || matches!(self.status(), Some(401 | 403))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}
