//! HTTP(S) deployment repositories.
//!
//! Files are uploaded with `PUT` in the Maven 2 layout, each followed by a
//! `.sha256` checksum. The [`Transport`] trait isolates the network so the
//! upload sequence can be tested without a server.

use super::metadata::{REMOTE_METADATA, VersionMetadata};
use super::{ArtifactStore, StoreError, StoredArtifact};
use crate::coordinate::Coordinate;
use crate::settings::ServerCredentials;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use sha2::{Digest, Sha256};
use std::fs;
use std::time::Duration;

/// Network timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Minimal HTTP operations needed to deploy artifacts.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Upload `body` to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    fn put(&self, url: &str, body: &[u8]) -> Result<(), StoreError>;

    /// Download `url`, returning `None` when the server answers 404.
    ///
    /// # Errors
    ///
    /// Returns an error for any other failure.
    fn get(&self, url: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Return whether `url` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for a reason other than 404.
    fn exists(&self, url: &str) -> Result<bool, StoreError>;
}

/// [`Transport`] backed by a `ureq` agent with optional basic authentication.
pub struct UreqTransport {
    agent: ureq::Agent,
    authorization: Option<String>,
}

impl UreqTransport {
    /// Create a transport, authenticating with `credentials` when given.
    #[must_use]
    pub fn new(credentials: Option<&ServerCredentials>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            authorization: credentials.map(basic_authorization),
        }
    }
}

impl Transport for UreqTransport {
    fn put(&self, url: &str, body: &[u8]) -> Result<(), StoreError> {
        let mut request = self.agent.put(url);
        if let Some(value) = &self.authorization {
            request = request.header("Authorization", value.as_str());
        }
        request
            .send(body)
            .map(drop)
            .map_err(|e| map_ureq_error(url, &e))
    }

    fn get(&self, url: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut request = self.agent.get(url);
        if let Some(value) = &self.authorization {
            request = request.header("Authorization", value.as_str());
        }
        match request.call() {
            Ok(response) => response
                .into_body()
                .read_to_vec()
                .map(Some)
                .map_err(|e| StoreError::Http {
                    url: url.to_owned(),
                    reason: e.to_string(),
                }),
            Err(ureq::Error::StatusCode(404)) => Ok(None),
            Err(e) => Err(map_ureq_error(url, &e)),
        }
    }

    fn exists(&self, url: &str) -> Result<bool, StoreError> {
        let mut request = self.agent.head(url);
        if let Some(value) = &self.authorization {
            request = request.header("Authorization", value.as_str());
        }
        match request.call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::StatusCode(404)) => Ok(false),
            Err(e) => Err(map_ureq_error(url, &e)),
        }
    }
}

/// Build the `Authorization` header value for basic authentication.
fn basic_authorization(credentials: &ServerCredentials) -> String {
    let pair = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", STANDARD.encode(pair))
}

/// Map a ureq error to a [`StoreError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> StoreError {
    match err {
        ureq::Error::StatusCode(status) => StoreError::Rejected {
            url: url.to_owned(),
            status: *status,
        },
        other => StoreError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

/// Return the lowercase hex SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// A deployment repository reached over HTTP(S).
pub struct HttpRepository {
    base_url: String,
    transport: Box<dyn Transport>,
}

impl HttpRepository {
    /// Create a repository rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &str, transport: Box<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            transport,
        }
    }

    /// Return the URL of `relative` inside the repository.
    #[must_use]
    pub fn url(&self, relative: &Utf8Path) -> String {
        let path: Vec<&str> = relative.components().map(|c| c.as_str()).collect();
        format!("{}/{}", self.base_url, path.join("/"))
    }

    fn upload(&self, url: &str, bytes: &[u8]) -> Result<(), StoreError> {
        trace!("PUT {url}");
        self.transport.put(url, bytes)?;
        self.transport
            .put(&format!("{url}.sha256"), sha256_hex(bytes).as_bytes())
    }

    fn update_metadata(&self, coordinate: &Coordinate) -> Result<(), StoreError> {
        let url = self.url(&coordinate.artifact_directory().join(REMOTE_METADATA));
        let mut metadata = self.transport.get(&url)?.map_or_else(
            || VersionMetadata::new(coordinate.group(), coordinate.name()),
            |bytes| {
                VersionMetadata::parse(
                    coordinate.group(),
                    coordinate.name(),
                    &String::from_utf8_lossy(&bytes),
                )
            },
        );
        metadata.add(coordinate.version());
        self.upload(&url, metadata.render().as_bytes())
    }
}

impl ArtifactStore for HttpRepository {
    fn store(&self, artifact: &StoredArtifact) -> Result<(), StoreError> {
        let coordinate = &artifact.coordinate;
        let directory: Utf8PathBuf = coordinate.version_directory();

        if let Some(pom) = &artifact.pom {
            let url = self.url(&directory.join(coordinate.pom_file_name()));
            if coordinate.classifier().is_none() || !self.transport.exists(&url)? {
                self.upload(&url, &read(pom)?)?;
            }
        }

        let url = self.url(&directory.join(coordinate.file_name()));
        self.upload(&url, &read(&artifact.payload)?)?;

        self.update_metadata(coordinate)
    }
}

fn read(path: &Utf8Path) -> Result<Vec<u8>, StoreError> {
    fs::read(path).map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
