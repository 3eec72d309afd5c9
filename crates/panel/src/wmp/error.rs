//! WMP-related errors.

use thiserror::Error;

/// Errors that can occur when talking to the WMP config API.
///
/// None of these reach a page: the client absorbs them into an empty
/// record after logging. They exist so the absorption site can tell
/// transport problems from unusable responses.
#[derive(Debug, Error)]
pub enum WmpError {
    /// HTTP request failed (connect, timeout, TLS).
    #[error("WMP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("WMP returned status {0}")]
    Status(reqwest::StatusCode),

    /// Response body was not valid JSON. Carries a bounded prefix of the
    /// body so the absorption site can log what upstream actually sent.
    #[error("WMP response was not valid JSON: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Response decoded but contained no usable record.
    #[error("WMP response contained no record")]
    Envelope,
}
