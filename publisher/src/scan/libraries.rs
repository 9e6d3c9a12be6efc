//! Compiled framework libraries under `frameworks/libs`.

use super::{RunContext, entry_name, player, visible_entries};
use crate::archive::FileFilter;
use crate::coordinate::{ArtifactKind, FRAMEWORK_GROUP_ID};
use crate::error::Result;
use crate::rules::{PLAYER_DIRECTORY, SWC_EXTENSION, small_sdk_membership, swc_source_path};
use camino::Utf8Path;
use log::info;

/// Publish every `.swc` below the library root, with its sources when
/// available. The `player` directory is handed to the player classifier.
///
/// # Errors
///
/// Returns the first traversal, archive or publishing error, or
/// [`PublisherError::ScanOrder`](crate::error::PublisherError::ScanOrder)
/// for an ambiguous player directory.
pub fn scan_libraries(ctx: &mut RunContext<'_>) -> Result<()> {
    let root = ctx.layout().libraries();
    info!("scanning libraries in {root}");
    scan_directory(ctx, &root)
}

fn scan_directory(ctx: &mut RunContext<'_>, dir: &Utf8Path) -> Result<()> {
    for path in visible_entries(dir)? {
        let name = entry_name(&path);
        if path.is_file() {
            if let Some(stem) = name.strip_suffix(SWC_EXTENSION) {
                publish_library(ctx, stem, &path)?;
            }
        } else if path.is_dir() {
            if name == PLAYER_DIRECTORY {
                player::scan_player(ctx, &path)?;
            } else {
                scan_directory(ctx, &path)?;
            }
        }
    }
    Ok(())
}

fn publish_library(ctx: &mut RunContext<'_>, name: &str, file: &Utf8Path) -> Result<()> {
    let coordinate = ctx.artifact(FRAMEWORK_GROUP_ID, name, ArtifactKind::Library)?;
    ctx.publish(&coordinate, file)?;
    ctx.subsets_mut()
        .record(small_sdk_membership(name), &coordinate);

    let sources = ctx.layout().framework_sources().join(swc_source_path(name));
    ctx.publish_sources(FRAMEWORK_GROUP_ID, name, &sources, &FileFilter::all())?;
    Ok(())
}
