//! Error types surfaced by client operations.

use reqwest::StatusCode;
use thiserror::Error;

use crate::accounts::ProviderError;

/// Failures a client operation can settle with.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP exchange itself failed: connecting, TLS, or reading the
    /// (possibly gzip-encoded) response body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    ///
    /// `message` carries the response body's `error` field and is empty when
    /// the body had none.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status the API answered with.
        status: StatusCode,
        /// The API's own error message, possibly empty.
        message: String,
    },

    /// The client was cancelled while the operation was pending or in flight.
    #[error("operation cancelled")]
    Cancelled,

    /// The account provider failed while credentials were being resolved.
    #[error("account lookup failed: {0}")]
    Accounts(#[source] ProviderError),

    /// A success response body did not have the shape the endpoint expects.
    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(#[from] serde_json::Error),

    /// The configured API root is not a usable absolute base URL.
    #[error("invalid api root: {0}")]
    InvalidApiRoot(String),

    /// A header value assembled from the configuration was malformed.
    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// The background transport worker could not be started.
    #[error("failed to start transport worker: {0}")]
    Worker(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
