//! Locale resource bundles under `frameworks/locale/<locale>`.

use super::{RunContext, entry_name, visible_entries};
use crate::coordinate::{ArtifactKind, Classifier, Coordinate, FRAMEWORK_GROUP_ID};
use crate::error::Result;
use crate::rules::{
    CANONICAL_LOCALE, DOCUMENTATION_ONLY_BUNDLES, RESOURCE_BUNDLE_SUFFIX, small_sdk_membership,
};
use camino::Utf8Path;
use log::{debug, info};

/// Publish every `<name>_rb.swc` of every locale, classified by locale.
///
/// `en_US` bundles are additionally published unclassified and only those
/// copies join the small SDK subsets. Bundles always use the SDK version.
///
/// # Errors
///
/// Returns the first traversal or publishing error.
pub fn scan_locales(ctx: &mut RunContext<'_>) -> Result<()> {
    let root = ctx.layout().locales();
    info!("scanning locales in {root}");
    for locale_dir in visible_entries(&root)? {
        if !locale_dir.is_dir() {
            debug!("skipping {locale_dir}: not a locale directory");
            continue;
        }
        let locale = entry_name(&locale_dir).to_owned();
        for bundle in visible_entries(&locale_dir)? {
            publish_bundle(ctx, &locale, &bundle)?;
        }
    }
    Ok(())
}

fn publish_bundle(ctx: &mut RunContext<'_>, locale: &str, file: &Utf8Path) -> Result<()> {
    let file_name = entry_name(file);
    if DOCUMENTATION_ONLY_BUNDLES.contains(&file_name) {
        debug!("skipping documentation-only bundle {file}");
        return Ok(());
    }
    let Some(name) = file_name.strip_suffix(RESOURCE_BUNDLE_SUFFIX) else {
        debug!("skipping {file}: not a resource bundle");
        return Ok(());
    };
    if !file.is_file() {
        return Ok(());
    }

    let version = ctx.versions().sdk();
    let plain = Coordinate::new(
        FRAMEWORK_GROUP_ID,
        name,
        version,
        ArtifactKind::ResourceBundle,
    );
    let classified = plain
        .clone()
        .with_classifier(Classifier::Locale(locale.to_owned()));
    ctx.publish(&classified, file)?;

    if locale == CANONICAL_LOCALE {
        ctx.publish(&plain, file)?;
        ctx.subsets_mut().record(small_sdk_membership(name), &plain);
    }
    Ok(())
}
