//! File-system repositories in the Maven 2 layout.
//!
//! The same store serves the local repository (`~/.m2/repository`) and
//! `file://` deployment targets; only the metadata file name differs.

use super::metadata::{LOCAL_METADATA, REMOTE_METADATA, VersionMetadata};
use super::{ArtifactStore, StoreError, StoredArtifact};
use crate::coordinate::Coordinate;
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::fs;
use std::io;

/// A Maven repository rooted in a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    root: Utf8PathBuf,
    metadata_name: &'static str,
}

impl LocalRepository {
    /// Open the local repository at `root`, maintaining
    /// `maven-metadata-local.xml`.
    #[must_use]
    pub const fn new(root: Utf8PathBuf) -> Self {
        Self {
            root,
            metadata_name: LOCAL_METADATA,
        }
    }

    /// Open a `file://` deployment repository at `root`, maintaining
    /// `maven-metadata.xml`.
    #[must_use]
    pub const fn deployment(root: Utf8PathBuf) -> Self {
        Self {
            root,
            metadata_name: REMOTE_METADATA,
        }
    }

    /// Return the repository root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Return where the payload of `coordinate` is stored.
    #[must_use]
    pub fn artifact_path(&self, coordinate: &Coordinate) -> Utf8PathBuf {
        self.root
            .join(coordinate.version_directory())
            .join(coordinate.file_name())
    }

    /// Return where the POM of `coordinate` is stored.
    #[must_use]
    pub fn pom_path(&self, coordinate: &Coordinate) -> Utf8PathBuf {
        self.root
            .join(coordinate.version_directory())
            .join(coordinate.pom_file_name())
    }

    fn update_metadata(&self, coordinate: &Coordinate) -> Result<(), StoreError> {
        let path = self
            .root
            .join(coordinate.artifact_directory())
            .join(self.metadata_name);
        let mut metadata = match fs::read_to_string(&path) {
            Ok(existing) => {
                VersionMetadata::parse(coordinate.group(), coordinate.name(), &existing)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                VersionMetadata::new(coordinate.group(), coordinate.name())
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        if metadata.add(coordinate.version()) || !path.exists() {
            fs::write(&path, metadata.render()).map_err(|e| StoreError::io(&path, e))?;
        }
        Ok(())
    }
}

impl ArtifactStore for LocalRepository {
    fn store(&self, artifact: &StoredArtifact) -> Result<(), StoreError> {
        let coordinate = &artifact.coordinate;
        let directory = self.root.join(coordinate.version_directory());
        fs::create_dir_all(&directory).map_err(|e| StoreError::io(&directory, e))?;

        if let Some(pom) = &artifact.pom {
            let target = self.pom_path(coordinate);
            if coordinate.classifier().is_none() || !target.exists() {
                trace!("copy {pom} -> {target}");
                copy(pom, &target)?;
            }
        }

        let target = self.artifact_path(coordinate);
        trace!("copy {} -> {target}", artifact.payload);
        copy(&artifact.payload, &target)?;

        self.update_metadata(coordinate)
    }
}

fn copy(from: &Utf8Path, to: &Utf8Path) -> Result<(), StoreError> {
    if !from.is_file() {
        return Err(StoreError::io(
            from,
            io::Error::new(io::ErrorKind::NotFound, "payload is not a regular file"),
        ));
    }
    fs::copy(from, to)
        .map(drop)
        .map_err(|e| StoreError::io(to, e))
}
