//! Error types for quake-feed.

use quake_core::SourceError;
use thiserror::Error;

/// Errors from the upstream HTTP fetches.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the upstream service.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Response body failed to decode.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FeedError> for SourceError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Http(inner) => SourceError::Request(inner.to_string()),
            FeedError::Status(code) => SourceError::Status(code),
            FeedError::Json(inner) => SourceError::Decode(inner),
        }
    }
}
