//! Aggregate POMs for the tracked subsets.
//!
//! Once every directory has been scanned, each subset becomes one POM-only
//! artifact whose dependencies are the subset members in the order they
//! were recorded. Empty subsets still produce an aggregate with no
//! dependencies.

use crate::coordinate::{ArtifactKind, Coordinate};
use crate::error::Result;
use crate::pom::Pom;
use crate::scan::RunContext;
use crate::subsets::SubsetKind;
use log::info;

/// Publish one aggregate per [`SubsetKind`], in [`SubsetKind::ALL`] order.
///
/// Returns the aggregate coordinates that were published.
///
/// # Errors
///
/// Returns the first error raised while writing or publishing an
/// aggregate.
pub fn build_aggregators(ctx: &mut RunContext<'_>) -> Result<Vec<Coordinate>> {
    let mut published = Vec::with_capacity(SubsetKind::ALL.len());
    for kind in SubsetKind::ALL {
        let coordinate = ctx.artifact(
            kind.group_id(),
            kind.aggregate_name(),
            ArtifactKind::Manifest,
        )?;
        let pom = Pom::aggregate(&coordinate, ctx.subsets().members(kind));
        info!(
            "publishing aggregate {coordinate} with {} members",
            pom.dependencies().len()
        );
        ctx.publish_pom(&coordinate, &pom)?;
        published.push(coordinate);
    }
    Ok(published)
}
