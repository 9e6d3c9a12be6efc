//! Error types for the Flex SDK publisher.
//!
//! This module defines the semantic error variants raised while scanning an
//! SDK tree and publishing its artifacts. Every classifier propagates these
//! immediately; the pipeline driver only adds the failing phase.

use crate::archive::ArchiveError;
use crate::repository::StoreError;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors that can occur while publishing an SDK.
#[derive(Debug, Error)]
pub enum PublisherError {
    /// Required configuration is missing or malformed.
    ///
    /// Raised for an undeterminable AIR version, an unreadable version
    /// descriptor, invalid settings, or an unsupported repository URL.
    #[error("configuration error: {reason}")]
    Configuration {
        /// Description of what is missing or malformed.
        reason: String,
    },

    /// The player directory holds more than one version subdirectory.
    ///
    /// Versions are not sorted by the publisher; the SDK tree must contain a
    /// single `playerglobal` version.
    #[error("{directory} holds several player versions ({}); keep one", .versions.join(", "))]
    ScanOrder {
        /// The player directory that was scanned.
        directory: Utf8PathBuf,
        /// The version subdirectories that were found.
        versions: Vec<String>,
    },

    /// A payload archive could not be built.
    #[error("archive creation failed")]
    Archive(#[from] ArchiveError),

    /// A (POM, payload) pair could not be written to a repository.
    #[error("cannot publish {coordinate}")]
    Publish {
        /// The coordinate being published, in `group:name:type[:classifier]:version` form.
        coordinate: String,
        /// The store failure.
        #[source]
        source: StoreError,
    },

    /// The same coordinate was produced twice in one run.
    #[error("{coordinate} was already published in this run")]
    DuplicateCoordinate {
        /// The repeated coordinate.
        coordinate: String,
    },

    /// Reading the SDK tree failed.
    #[error("I/O error at {path}")]
    Io {
        /// Path being read when the error occurred.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PublisherError {
    /// Build a [`PublisherError::Configuration`] from any message.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Build a [`PublisherError::Io`] for `path`.
    #[must_use]
    pub fn io(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// Result type alias using [`PublisherError`].
pub type Result<T> = std::result::Result<T, PublisherError>;
