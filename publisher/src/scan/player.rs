//! The `playerglobal` runtime library under `frameworks/libs/player`.

use super::{RunContext, entry_name, visible_entries};
use crate::coordinate::{ArtifactKind, Coordinate, FRAMEWORK_GROUP_ID};
use crate::error::{PublisherError, Result};
use crate::rules::{PLAYERGLOBAL, SWC_EXTENSION};
use crate::subsets::SubsetKind;
use camino::Utf8Path;
use log::debug;

/// Publish `<version>/playerglobal.swc` from the single version directory
/// inside `dir`.
///
/// The version is the directory name. The whole directory is checked before
/// anything is published.
pub(super) fn scan_player(ctx: &mut RunContext<'_>, dir: &Utf8Path) -> Result<()> {
    let versions: Vec<String> = visible_entries(dir)?
        .into_iter()
        .filter(|path| path.is_dir())
        .map(|path| entry_name(&path).to_owned())
        .collect();

    let version = match versions.as_slice() {
        [] => {
            debug!("no player version under {dir}");
            return Ok(());
        }
        [version] => version,
        _ => {
            return Err(PublisherError::ScanOrder {
                directory: dir.to_owned(),
                versions,
            });
        }
    };

    let coordinate = Coordinate::new(
        FRAMEWORK_GROUP_ID,
        PLAYERGLOBAL,
        version,
        ArtifactKind::Library,
    );
    let payload = dir
        .join(version)
        .join(format!("{PLAYERGLOBAL}{SWC_EXTENSION}"));
    ctx.publish(&coordinate, &payload)?;
    ctx.subsets_mut()
        .add(SubsetKind::FlexFrameworkSmall, coordinate);
    Ok(())
}
