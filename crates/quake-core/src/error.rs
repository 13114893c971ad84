//! Error type for collaborator operations.

use thiserror::Error;

/// Errors produced by the external collaborators (report feed, place-name
/// dataset, override store).
///
/// These are recovered locally by the consuming layer: a failed fetch
/// degrades that subsystem for the poll, it never aborts the poll itself.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network-level request failure.
    #[error("request failed: {0}")]
    Request(String),

    /// Non-2xx response from the upstream service.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Response body failed to decode.
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Persistent store read/write failure.
    #[error("store error: {0}")]
    Store(String),
}
