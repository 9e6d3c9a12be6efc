//! Shared test utilities for the publisher crate.
//!
//! [`RecordingStore`] captures every stored artifact in memory and
//! [`SdkTree`] lays out a throwaway SDK directory.
#![expect(clippy::expect_used, reason = "fixtures abort the test on setup failure")]
#![expect(
    clippy::must_use_candidate,
    reason = "tree builders are called for their side effects"
)]

use crate::coordinate::Coordinate;
use crate::repository::{ArtifactStore, StoreError, StoredArtifact};
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

/// SDK version written by [`SdkTree::new`].
pub const SDK_VERSION: &str = "4.1.0.16076";

/// AIR version written by [`SdkTree::with_air_plist`].
pub const AIR_VERSION: &str = "2.0.2.12610";

const SDK_DESCRIPTION: &str = concat!(
    "<flex-sdk-description>\n",
    "  <name>Flex 4.1</name>\n",
    "  <version>4.1.0</version>\n",
    "  <build>16076</build>\n",
    "</flex-sdk-description>\n",
);

/// One artifact captured by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// The stored coordinate.
    pub coordinate: Coordinate,
    /// The payload bytes at the time of the call.
    pub payload: Vec<u8>,
    /// The POM text at the time of the call, if one was attached.
    pub pom: Option<String>,
}

/// An [`ArtifactStore`] that records every call.
///
/// Clones share the same log, so a test can keep one handle while the
/// pipeline owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    records: Rc<RefCell<Vec<Recorded>>>,
    fail_on: Option<String>,
}

impl RecordingStore {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a handle that rejects any artifact called `name`.
    #[must_use]
    pub fn failing_on(&self, name: &str) -> Self {
        Self {
            records: Rc::clone(&self.records),
            fail_on: Some(name.to_owned()),
        }
    }

    /// Return a copy of everything recorded so far.
    #[must_use]
    pub fn records(&self) -> Vec<Recorded> {
        self.records.borrow().clone()
    }

    /// Return the recorded coordinates in `group:name:type[:classifier]:version` form.
    #[must_use]
    pub fn coordinates(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .map(|record| record.coordinate.to_string())
            .collect()
    }

    /// Return the first record whose coordinate renders as `coordinate`.
    #[must_use]
    pub fn find(&self, coordinate: &str) -> Option<Recorded> {
        self.records
            .borrow()
            .iter()
            .find(|record| record.coordinate.to_string() == coordinate)
            .cloned()
    }
}

impl ArtifactStore for RecordingStore {
    fn store(&self, artifact: &StoredArtifact) -> Result<(), StoreError> {
        if self.fail_on.as_deref() == Some(artifact.coordinate.name()) {
            return Err(StoreError::Http {
                url: artifact.coordinate.file_name(),
                reason: "rejected by test store".to_owned(),
            });
        }
        let payload =
            fs::read(&artifact.payload).map_err(|e| StoreError::io(&artifact.payload, e))?;
        let pom = artifact
            .pom
            .as_ref()
            .map(|path| fs::read_to_string(path).map_err(|e| StoreError::io(path, e)))
            .transpose()?;
        self.records.borrow_mut().push(Recorded {
            coordinate: artifact.coordinate.clone(),
            payload,
            pom,
        });
        Ok(())
    }
}

/// A temporary SDK tree with the minimal layout a run needs.
///
/// [`SdkTree::new`] creates the version descriptor, empty library, locale
/// and compiler directories, one configuration file and the Spark theme.
/// Helper methods add further content and return `&Self` for chaining.
#[derive(Debug)]
pub struct SdkTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Default for SdkTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SdkTree {
    /// Create the minimal tree.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created or written.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp SDK directory");
        let root = Utf8PathBuf::from_path_buf(dir.path().join("sdk")).expect("utf8 temp path");
        let tree = Self { _dir: dir, root };
        tree.file(crate::sdk::SDK_DESCRIPTOR, SDK_DESCRIPTION);
        tree.dir("frameworks/libs");
        tree.dir("frameworks/locale");
        tree.dir("lib");
        tree.file("frameworks/flex-config.xml", "<flex-config/>");
        tree.file("frameworks/themes/Spark/spark.css", "/* spark */");
        tree
    }

    /// Return the SDK root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` to `relative`, creating parents.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn file(&self, relative: &str, contents: &str) -> &Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, contents).expect("write SDK file");
        self
    }

    /// Create the directory `relative`.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.root.join(relative)).expect("create SDK directory");
        self
    }

    /// Remove the file `relative`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be removed.
    pub fn remove(&self, relative: &str) -> &Self {
        fs::remove_file(self.root.join(relative)).expect("remove SDK file");
        self
    }

    /// Add `frameworks/libs/<relative>` with placeholder contents.
    pub fn library(&self, relative: &str) -> &Self {
        self.file(&format!("frameworks/libs/{relative}"), relative)
    }

    /// Add `frameworks/locale/<locale>/<file_name>`.
    pub fn locale_bundle(&self, locale: &str, file_name: &str) -> &Self {
        self.file(
            &format!("frameworks/locale/{locale}/{file_name}"),
            &format!("{locale}/{file_name}"),
        )
    }

    /// Add `frameworks/libs/player/<version>/playerglobal.swc`.
    pub fn player(&self, version: &str) -> &Self {
        self.file(
            &format!("frameworks/libs/player/{version}/playerglobal.swc"),
            version,
        )
    }

    /// Add `lib/<file_name>` to the compiler tree.
    pub fn compiler_jar(&self, file_name: &str) -> &Self {
        self.file(&format!("lib/{file_name}"), file_name)
    }

    /// Add the AIR runtime `Info.plist` declaring [`AIR_VERSION`].
    pub fn with_air_plist(&self) -> &Self {
        self.file(
            crate::sdk::AIR_DESCRIPTOR,
            &format!(
                "<plist><dict>\n  <key>CFBundleVersion</key>\n  \
                 <string>{AIR_VERSION}</string>\n</dict></plist>\n"
            ),
        )
    }
}
