//! Two-phase publishing of (POM, payload) pairs.
//!
//! For every artifact the publisher renders a POM into the generated-POM
//! scratch file, then hands the pair to the local store and, when
//! deploying, to the remote store. A remote failure never undoes the local
//! write.

use crate::coordinate::{ArtifactKind, Coordinate};
use crate::error::{PublisherError, Result};
use crate::pom::Pom;
use crate::repository::{ArtifactStore, StoredArtifact};
use camino::Utf8Path;
use log::{debug, info};

/// The stores every artifact is written to.
pub struct PublishTargets {
    local: Box<dyn ArtifactStore>,
    remote: Option<Box<dyn ArtifactStore>>,
}

impl PublishTargets {
    /// Publish into the local store only.
    #[must_use]
    pub fn install(local: Box<dyn ArtifactStore>) -> Self {
        Self {
            local,
            remote: None,
        }
    }

    /// Publish into the local store, then the remote store.
    #[must_use]
    pub fn deploy(local: Box<dyn ArtifactStore>, remote: Box<dyn ArtifactStore>) -> Self {
        Self {
            local,
            remote: Some(remote),
        }
    }

    /// Return true if artifacts are also deployed remotely.
    #[must_use]
    pub const fn is_deploy(&self) -> bool {
        self.remote.is_some()
    }
}

/// Publishes one artifact at a time through [`PublishTargets`].
pub struct Publisher<'a> {
    targets: &'a PublishTargets,
    pom_scratch: &'a Utf8Path,
}

impl<'a> Publisher<'a> {
    /// Create a publisher rendering POMs into `pom_scratch`.
    #[must_use]
    pub const fn new(targets: &'a PublishTargets, pom_scratch: &'a Utf8Path) -> Self {
        Self {
            targets,
            pom_scratch,
        }
    }

    /// Publish `payload` under `coordinate`.
    ///
    /// POM-only (`manifest`) coordinates are published as-is; every other
    /// kind gets a freshly generated POM.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Io`] if the POM cannot be written and
    /// [`PublisherError::Publish`] if a store rejects the artifact.
    pub fn publish(&self, coordinate: &Coordinate, payload: &Utf8Path) -> Result<()> {
        let pom = if coordinate.kind() == ArtifactKind::Manifest {
            None
        } else {
            Pom::for_coordinate(coordinate)
                .write_to(self.pom_scratch)
                .map_err(|e| PublisherError::io(self.pom_scratch, e))?;
            Some(self.pom_scratch)
        };
        let artifact = StoredArtifact::new(coordinate.clone(), payload, pom);

        store(self.targets.local.as_ref(), &artifact)?;
        if let Some(remote) = &self.targets.remote {
            debug!("deploying {coordinate}");
            store(remote.as_ref(), &artifact)?;
        }
        info!("published {coordinate}");
        Ok(())
    }
}

fn store(target: &dyn ArtifactStore, artifact: &StoredArtifact) -> Result<()> {
    target
        .store(artifact)
        .map_err(|source| PublisherError::Publish {
            coordinate: artifact.coordinate.to_string(),
            source,
        })
}
