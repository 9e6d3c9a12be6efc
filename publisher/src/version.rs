//! Version selection for published artifacts.
//!
//! Most artifacts are published under the SDK version. A fixed set of names
//! ([`VERSION_OVERRIDES`]) belongs to the AIR runtime and is published under
//! the AIR version instead.

use crate::error::{PublisherError, Result};
use crate::rules::VERSION_OVERRIDES;

/// The two version strings a run publishes under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSet {
    sdk: String,
    air: Option<String>,
}

impl VersionSet {
    /// Create a version set. `air` is `None` when the release ships no AIR
    /// runtime.
    #[must_use]
    pub fn new(sdk: impl Into<String>, air: Option<String>) -> Self {
        Self {
            sdk: sdk.into(),
            air,
        }
    }

    /// Return the SDK version.
    #[must_use]
    pub fn sdk(&self) -> &str {
        &self.sdk
    }

    /// Return the AIR runtime version, if known.
    #[must_use]
    pub fn air(&self) -> Option<&str> {
        self.air.as_deref()
    }

    /// Return the version an artifact called `name` is published under.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Configuration`] when `name` is an AIR
    /// artifact but the AIR version could not be determined.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_sdk_publisher::version::VersionSet;
    ///
    /// let versions = VersionSet::new("4.1.0.16076", Some("2.0.2.12610".to_owned()));
    /// assert_eq!(versions.resolve("spark").expect("sdk version"), "4.1.0.16076");
    /// assert_eq!(versions.resolve("airglobal").expect("air version"), "2.0.2.12610");
    /// ```
    pub fn resolve(&self, name: &str) -> Result<&str> {
        if !VERSION_OVERRIDES.contains(&name) {
            return Ok(&self.sdk);
        }
        self.air.as_deref().ok_or_else(|| {
            PublisherError::configuration(format!(
                "AIR version cannot be determined, but {name} exists"
            ))
        })
    }
}
