//! Artifact repositories.
//!
//! An [`ArtifactStore`] receives one (coordinate, payload, POM) triple at a
//! time and files it in the Maven 2 layout. The local repository, `file://`
//! and HTTP(S) deployment repositories, and a dry-run store implement it.

mod dry_run;
mod error;
pub mod http;
mod local;
pub mod metadata;

pub use dry_run::DryRunStore;
pub use error::StoreError;
pub use http::{HttpRepository, Transport, UreqTransport};
pub use local::LocalRepository;

use crate::coordinate::Coordinate;
use crate::error::{PublisherError, Result};
use crate::settings::ServerCredentials;
use camino::{Utf8Path, Utf8PathBuf};

/// One (coordinate, payload, POM) triple handed to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    /// Where the artifact is filed.
    pub coordinate: Coordinate,
    /// The file holding the artifact bytes.
    pub payload: Utf8PathBuf,
    /// The generated POM; `None` for POM-only artifacts.
    pub pom: Option<Utf8PathBuf>,
}

impl StoredArtifact {
    /// Bundle a payload and optional POM under `coordinate`.
    #[must_use]
    pub fn new(coordinate: Coordinate, payload: &Utf8Path, pom: Option<&Utf8Path>) -> Self {
        Self {
            coordinate,
            payload: payload.to_owned(),
            pom: pom.map(Utf8Path::to_owned),
        }
    }
}

/// Destination for published artifacts.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactStore {
    /// Store the payload of `artifact`, attaching its POM when present.
    ///
    /// A POM attached to a classified coordinate does not replace an
    /// existing POM of the same group, name and version.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if any file cannot be read or written.
    fn store(&self, artifact: &StoredArtifact) -> std::result::Result<(), StoreError>;
}

/// Open the deployment repository at `url`.
///
/// `file://` URLs open a directory repository; `http://` and `https://`
/// URLs upload with `PUT`, authenticating with `credentials` when given.
///
/// # Errors
///
/// Returns [`PublisherError::Configuration`] for any other scheme.
///
/// # Examples
///
/// ```
/// use flex_sdk_publisher::repository::remote_store;
///
/// assert!(remote_store("file:///srv/maven", None).is_ok());
/// assert!(remote_store("ftp://example.test/maven", None).is_err());
/// ```
pub fn remote_store(
    url: &str,
    credentials: Option<&ServerCredentials>,
) -> Result<Box<dyn ArtifactStore>> {
    if let Some(path) = url.strip_prefix("file://") {
        if path.is_empty() {
            return Err(PublisherError::configuration(format!(
                "deployment URL {url} names no directory"
            )));
        }
        return Ok(Box::new(LocalRepository::deployment(Utf8PathBuf::from(path))));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        let transport = UreqTransport::new(credentials);
        return Ok(Box::new(HttpRepository::new(url, Box::new(transport))));
    }
    Err(PublisherError::configuration(format!(
        "unsupported deployment URL {url}; expected file://, http:// or https://"
    )))
}
