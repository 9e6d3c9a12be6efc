//! Compiler tool jars under `<compiler-home>/lib`.

use super::{RunContext, entry_name, visible_entries};
use crate::archive::FileFilter;
use crate::coordinate::{ArtifactKind, COMPILER_GROUP_ID};
use crate::error::Result;
use crate::rules::{JAR_EXTENSION, compiler_source, is_publishable_compiler_jar};
use crate::subsets::SubsetKind;
use log::{debug, info};

/// Publish every compiler jar outside the deny-list and the locale jars,
/// followed by its sources for the jars with a known source tree.
///
/// # Errors
///
/// Returns the first traversal, archive or publishing error.
pub fn scan_compiler(ctx: &mut RunContext<'_>) -> Result<()> {
    let jars = ctx.layout().compiler_libraries();
    info!("scanning compiler jars in {jars}");
    for path in visible_entries(&jars)? {
        let file_name = entry_name(&path);
        if !path.is_file() || !is_publishable_compiler_jar(file_name) {
            continue;
        }
        let Some(name) = file_name.strip_suffix(JAR_EXTENSION) else {
            continue;
        };

        let coordinate = ctx.artifact(COMPILER_GROUP_ID, name, ArtifactKind::Tool)?;
        ctx.publish(&coordinate, &path)?;
        ctx.subsets_mut().add(SubsetKind::Compiler, coordinate);

        let Some(source) = compiler_source(name) else {
            debug!("{name} has no known source tree");
            continue;
        };
        let dir = ctx.layout().compiler_home().join(source.path);
        let filter = FileFilter::new(source.includes, &[])?;
        ctx.publish_sources(COMPILER_GROUP_ID, name, &dir, &filter)?;
    }
    Ok(())
}
