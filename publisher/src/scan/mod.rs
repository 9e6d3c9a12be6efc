//! Directory classifiers for each SDK subtree.
//!
//! Each classifier walks one part of the SDK tree, derives coordinates from
//! file names and path conventions, publishes through the shared
//! [`RunContext`], and records subset membership as it goes. Hidden entries
//! are skipped and listings are sorted so runs are deterministic.

mod compiler;
mod configs;
mod libraries;
mod locales;
mod player;
mod rsls;
mod themes;

pub use compiler::scan_compiler;
pub use configs::scan_configs;
pub use libraries::scan_libraries;
pub use locales::scan_locales;
pub use rsls::scan_rsls;
pub use themes::scan_themes;

use crate::archive::{FileFilter, ZipArchiver};
use crate::coordinate::{ArtifactKind, Classifier, Coordinate};
use crate::error::{PublisherError, Result};
use crate::pom::Pom;
use crate::publisher::Publisher;
use crate::sdk::SdkLayout;
use crate::subsets::Subsets;
use crate::version::VersionSet;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::collections::HashSet;

/// How a source directory is collected into an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Only the files directly inside the directory.
    TopLevel,
    /// Every file below the directory.
    Recursive,
}

/// State shared by every classifier during one run.
pub struct RunContext<'a> {
    layout: &'a SdkLayout,
    versions: &'a VersionSet,
    publisher: Publisher<'a>,
    scratch: &'a Utf8Path,
    archiver: ZipArchiver,
    subsets: Subsets,
    published: Vec<Coordinate>,
    seen: HashSet<Coordinate>,
}

impl<'a> RunContext<'a> {
    /// Create a context publishing through `publisher`, building generated
    /// payloads in `scratch`.
    #[must_use]
    pub fn new(
        layout: &'a SdkLayout,
        versions: &'a VersionSet,
        publisher: Publisher<'a>,
        scratch: &'a Utf8Path,
    ) -> Self {
        Self {
            layout,
            versions,
            publisher,
            scratch,
            archiver: ZipArchiver::new(),
            subsets: Subsets::default(),
            published: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Return the SDK layout.
    #[must_use]
    pub const fn layout(&self) -> &'a SdkLayout {
        self.layout
    }

    /// Return the run's versions.
    #[must_use]
    pub const fn versions(&self) -> &'a VersionSet {
        self.versions
    }

    /// Return the subsets accumulated so far.
    #[must_use]
    pub const fn subsets(&self) -> &Subsets {
        &self.subsets
    }

    /// Return the subsets for recording members.
    pub const fn subsets_mut(&mut self) -> &mut Subsets {
        &mut self.subsets
    }

    /// Return every coordinate published so far, in order.
    #[must_use]
    pub fn published(&self) -> &[Coordinate] {
        &self.published
    }

    /// Consume the context, returning the published coordinates and subsets.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Coordinate>, Subsets) {
        (self.published, self.subsets)
    }

    /// Build an unclassified coordinate whose version follows the override
    /// rule.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Configuration`] if `name` needs the AIR
    /// version and it is unknown.
    pub fn artifact(&self, group: &str, name: &str, kind: ArtifactKind) -> Result<Coordinate> {
        let version = self.versions.resolve(name)?;
        Ok(Coordinate::new(group, name, version, kind))
    }

    /// Publish `payload` under `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::DuplicateCoordinate`] if the coordinate was
    /// already published in this run, or the publisher's error.
    pub fn publish(&mut self, coordinate: &Coordinate, payload: &Utf8Path) -> Result<()> {
        if !self.seen.insert(coordinate.clone()) {
            return Err(PublisherError::DuplicateCoordinate {
                coordinate: coordinate.to_string(),
            });
        }
        self.publisher.publish(coordinate, payload)?;
        self.published.push(coordinate.clone());
        Ok(())
    }

    /// Zip the files of `dir` accepted by `filter` into the scratch file and
    /// publish the archive under `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Archive`] if the archive cannot be built,
    /// or any publishing error.
    pub fn archive_and_publish(
        &mut self,
        coordinate: &Coordinate,
        dir: &Utf8Path,
        filter: &FileFilter,
        depth: Depth,
    ) -> Result<()> {
        self.archiver.reset();
        match depth {
            Depth::TopLevel => self.archiver.add_top_level(dir, filter)?,
            Depth::Recursive => self.archiver.add_directory(dir, filter)?,
        }
        let entries = self.archiver.create_archive(self.scratch)?;
        debug!("archived {entries} files from {dir} for {coordinate}");
        let scratch = self.scratch;
        self.publish(coordinate, scratch)
    }

    /// Publish a `sources` jar for `name` built from `dir`, if `dir` exists.
    ///
    /// Returns whether a source archive was published.
    ///
    /// # Errors
    ///
    /// Propagates archive and publishing errors.
    pub fn publish_sources(
        &mut self,
        group: &str,
        name: &str,
        dir: &Utf8Path,
        filter: &FileFilter,
    ) -> Result<bool> {
        if !dir.is_dir() {
            debug!("no sources for {name} at {dir}");
            return Ok(false);
        }
        let coordinate = self
            .artifact(group, name, ArtifactKind::Tool)?
            .with_classifier(Classifier::Sources);
        self.archive_and_publish(&coordinate, dir, filter, Depth::Recursive)?;
        Ok(true)
    }

    /// Render `pom` into the scratch file and publish it as a POM-only
    /// artifact under `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Io`] if the scratch file cannot be written,
    /// or any publishing error.
    pub fn publish_pom(&mut self, coordinate: &Coordinate, pom: &Pom) -> Result<()> {
        pom.write_to(self.scratch)
            .map_err(|e| PublisherError::io(self.scratch, e))?;
        let scratch = self.scratch;
        self.publish(coordinate, scratch)
    }
}

/// List the non-hidden entries of `dir`, sorted by name.
pub(crate) fn visible_entries(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut entries = Vec::new();
    for entry in dir.read_dir_utf8().map_err(|e| PublisherError::io(dir, e))? {
        let entry = entry.map_err(|e| PublisherError::io(dir, e))?;
        if !entry.file_name().starts_with('.') {
            entries.push(entry.into_path());
        }
    }
    entries.sort();
    Ok(entries)
}

/// Return the final component of a listed path.
pub(crate) fn entry_name(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or_default()
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
