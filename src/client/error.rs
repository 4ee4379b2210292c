//! Client-side error types.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised by [`TaskApiClient`](super::TaskApiClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL cannot be used.
    #[error("invalid server URL '{0}'")]
    InvalidUrl(String),

    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status} {code}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Stable error code from the body, or `UNKNOWN`.
        code: String,
        /// Message from the body.
        message: String,
    },

    /// The operation needs a session and none is established.
    #[error("not signed in")]
    NotSignedIn,
}

impl ClientError {
    /// Returns `true` when the server rejected the credentials or token.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

/// Errors raised while persisting or restoring the session.
#[derive(Debug, Error)]
pub enum SessionFileError {
    /// The session directory or file could not be accessed.
    #[error("session storage at {path}: {source}")]
    Io {
        /// Directory holding the session.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The stored session is not valid JSON.
    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The in-process session lock was poisoned.
    #[error("session state lock poisoned")]
    Poisoned,
}
