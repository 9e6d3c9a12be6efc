//! Error types for repository writes.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising while storing an artifact in a repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a payload or writing into a file repository failed.
    #[error("I/O error at {path}")]
    Io {
        /// The file being read or written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request could not be completed.
    #[error("request to {url} failed: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The server answered with an error status.
    #[error("{url} rejected the upload with HTTP {status}")]
    Rejected {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
}

impl StoreError {
    /// Build a [`StoreError::Io`] for `path`.
    #[must_use]
    pub fn io(path: &camino::Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}
