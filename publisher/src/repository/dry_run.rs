//! A store that only reports what would be written.

use super::{ArtifactStore, StoreError, StoredArtifact};
use log::info;

/// Logs each artifact instead of storing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunStore {
    target: String,
}

impl DryRunStore {
    /// Create a store reporting writes into `target`.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl ArtifactStore for DryRunStore {
    fn store(&self, artifact: &StoredArtifact) -> Result<(), StoreError> {
        let with_pom = if artifact.pom.is_some() { " with POM" } else { "" };
        info!(
            "[dry run] would store {}{with_pom} in {}",
            artifact.coordinate, self.target
        );
        Ok(())
    }
}
