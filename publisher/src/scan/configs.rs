//! The zipped framework configuration files.

use super::{Depth, RunContext};
use crate::archive::FileFilter;
use crate::coordinate::{ArtifactKind, Classifier, FRAMEWORK_GROUP_ID};
use crate::error::Result;
use crate::rules::{CONFIG_EXCLUDES, CONFIG_INCLUDES};
use crate::subsets::SubsetKind;
use log::info;

/// Name shared by the configuration bundle and the framework library.
const CONFIGS_ARTIFACT: &str = "framework";

/// Zip the top-level configuration files of `frameworks` and publish them
/// as `framework:zip:configs`, a member of both small framework subsets.
///
/// # Errors
///
/// Returns the archive or publishing error.
pub fn scan_configs(ctx: &mut RunContext<'_>) -> Result<()> {
    let frameworks = ctx.layout().frameworks();
    info!("bundling configuration files from {frameworks}");
    let filter = FileFilter::new(CONFIG_INCLUDES, CONFIG_EXCLUDES)?;
    let coordinate = ctx
        .artifact(FRAMEWORK_GROUP_ID, CONFIGS_ARTIFACT, ArtifactKind::Archive)?
        .with_classifier(Classifier::Configs);

    ctx.archive_and_publish(&coordinate, &frameworks, &filter, Depth::TopLevel)?;

    let subsets = ctx.subsets_mut();
    subsets.add(SubsetKind::AirFrameworkSmall, coordinate.clone());
    subsets.add(SubsetKind::FlexFrameworkSmall, coordinate);
    Ok(())
}
