//! Zip payloads built on the fly from SDK directories.
//!
//! The configuration bundle and every source archive are produced here: a
//! [`ZipArchiver`] collects files from one or more directories through a
//! [`FileFilter`] of include and exclude globs, then writes them into a
//! single zip file. The archiver is reused across the run and must be
//! [`reset`](ZipArchiver::reset) between payloads.

use camino::{Utf8Path, Utf8PathBuf};
use glob::{MatchOptions, Pattern, PatternError};
use log::trace;
use std::fs;
use std::io;
use thiserror::Error;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Errors arising while building a zip payload.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Reading a source file or writing the archive failed.
    #[error("I/O error at {path}")]
    Io {
        /// The file being read or written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The zip writer rejected an entry.
    #[error("zip writer failed")]
    Zip(#[from] zip::result::ZipError),

    /// An include or exclude glob is malformed.
    #[error("invalid glob `{pattern}`")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// The parser error.
        #[source]
        source: PatternError,
    },

    /// No file matched the filter, so there is nothing to publish.
    #[error("no files to archive under {source_dir}")]
    NothingToArchive {
        /// The directory that was scanned last.
        source_dir: Utf8PathBuf,
    },
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Include and exclude globs applied to `/`-separated relative paths.
///
/// An empty include list accepts every path. Excludes win over includes.
///
/// # Examples
///
/// ```
/// use flex_sdk_publisher::archive::FileFilter;
///
/// let filter = FileFilter::new(&["*.xml"], &["build.xml"]).expect("valid globs");
/// assert!(filter.matches("flex-config.xml"));
/// assert!(!filter.matches("build.xml"));
/// assert!(!filter.matches("nested/flex-config.xml"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl FileFilter {
    /// Return a filter accepting every file.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Compile include and exclude globs.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidPattern`] for the first malformed glob.
    pub fn new(includes: &[&str], excludes: &[&str]) -> Result<Self, ArchiveError> {
        Ok(Self {
            includes: compile_all(includes)?,
            excludes: compile_all(excludes)?,
        })
    }

    /// Return true if `relative` should be archived.
    #[must_use]
    pub fn matches(&self, relative: &str) -> bool {
        let included = self.includes.is_empty()
            || self
                .includes
                .iter()
                .any(|pattern| pattern.matches_with(relative, MATCH_OPTIONS));
        included
            && !self
                .excludes
                .iter()
                .any(|pattern| pattern.matches_with(relative, MATCH_OPTIONS))
    }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Pattern>, ArchiveError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| ArchiveError::InvalidPattern {
                pattern: (*pattern).to_owned(),
                source,
            })
        })
        .collect()
}

/// Collects `(source file, entry name)` pairs and writes them as a zip.
#[derive(Debug, Default)]
pub struct ZipArchiver {
    entries: Vec<(Utf8PathBuf, String)>,
    last_source: Option<Utf8PathBuf>,
}

impl ZipArchiver {
    /// Create an empty archiver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every collected entry.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.last_source = None;
    }

    /// Return the number of collected entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true if nothing has been collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect every file below `dir` accepted by `filter`, recursively.
    ///
    /// Entry names are paths relative to `dir`. Hidden entries are skipped
    /// and directory listings are sorted.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] if a directory cannot be listed.
    pub fn add_directory(
        &mut self,
        dir: &Utf8Path,
        filter: &FileFilter,
    ) -> Result<(), ArchiveError> {
        self.last_source = Some(dir.to_owned());
        self.collect(dir, "", filter, true)
    }

    /// Collect the files directly inside `dir` accepted by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] if the directory cannot be listed.
    pub fn add_top_level(
        &mut self,
        dir: &Utf8Path,
        filter: &FileFilter,
    ) -> Result<(), ArchiveError> {
        self.last_source = Some(dir.to_owned());
        self.collect(dir, "", filter, false)
    }

    /// Write the collected entries to `dest`, replacing any previous content.
    ///
    /// Returns the number of entries written.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::NothingToArchive`] if no entry was collected,
    /// or [`ArchiveError::Io`] / [`ArchiveError::Zip`] on write failures.
    pub fn create_archive(&self, dest: &Utf8Path) -> Result<usize, ArchiveError> {
        if self.entries.is_empty() {
            return Err(ArchiveError::NothingToArchive {
                source_dir: self.last_source.clone().unwrap_or_default(),
            });
        }

        let file = fs::File::create(dest).map_err(|source| io_error(dest, source))?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (source_path, entry_name) in &self.entries {
            trace!("zip {entry_name} <- {source_path}");
            writer.start_file(entry_name.as_str(), options)?;
            let mut input =
                fs::File::open(source_path).map_err(|source| io_error(source_path, source))?;
            io::copy(&mut input, &mut writer).map_err(|source| io_error(source_path, source))?;
        }

        writer.finish()?;
        Ok(self.entries.len())
    }

    fn collect(
        &mut self,
        dir: &Utf8Path,
        prefix: &str,
        filter: &FileFilter,
        recursive: bool,
    ) -> Result<(), ArchiveError> {
        for path in sorted_entries(dir)? {
            let Some(name) = path.file_name() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let relative = if prefix.is_empty() {
                name.to_owned()
            } else {
                format!("{prefix}/{name}")
            };
            if path.is_dir() {
                if recursive {
                    self.collect(&path, &relative, filter, recursive)?;
                }
            } else if path.is_file() && filter.matches(&relative) {
                self.entries.push((path, relative));
            }
        }
        Ok(())
    }
}

fn sorted_entries(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ArchiveError> {
    let mut entries = Vec::new();
    for entry in dir.read_dir_utf8().map_err(|source| io_error(dir, source))? {
        let entry = entry.map_err(|source| io_error(dir, source))?;
        entries.push(entry.into_path());
    }
    entries.sort();
    Ok(entries)
}

fn io_error(path: &Utf8Path, source: io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.to_owned(),
        source,
    }
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
