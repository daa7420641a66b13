//! Error types surfaced by the API client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error name used when the service answers with a body that is not a
/// structured error document.
pub const APPLICATION_ERROR: &str = "application_error";

/// Structured error reported by the service for a completed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable description supplied by the service.
    pub message: String,
    /// Machine-readable error tag (for example `validation_error`).
    pub name: String,
    #[serde(rename = "statusCode", default, skip_serializing_if = "Option::is_none")]
    /// HTTP status code echoed in the error body, when present.
    pub status_code: Option<u16>,
}

impl ApiError {
    /// Build an error from a message and name without a status code.
    #[must_use]
    pub fn new(message: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: name.into(),
            status_code: None,
        }
    }
}

/// Failures returned by [`crate::ResendClient`] operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request completed and the service reported an error.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
    /// The API key cannot be carried in an HTTP header.
    #[error("API key contains characters that are not valid in an HTTP header")]
    InvalidApiKey,
    /// The base URL cannot carry a request path.
    #[error("base URL '{base_url}' cannot be used to build request paths")]
    InvalidBaseUrl {
        /// Offending base URL.
        base_url: String,
    },
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request to {path} failed")]
    Transport {
        /// Request path relative to the base URL.
        path: String,
        /// Transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// A successful response carried a body that is not valid JSON.
    #[error("failed to parse response from {path}")]
    Decode {
        /// Request path relative to the base URL.
        path: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for client operations.
pub type ApiResult<T> = Result<T, ClientError>;
