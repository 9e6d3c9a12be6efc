//! The Spark theme stylesheet.

use super::RunContext;
use crate::coordinate::{ArtifactKind, Classifier, FRAMEWORK_GROUP_ID};
use crate::error::Result;
use log::info;

/// Publish `frameworks/themes/Spark/spark.css` as `spark:css:theme`.
///
/// # Errors
///
/// Returns the publishing error, including a missing stylesheet.
pub fn scan_themes(ctx: &mut RunContext<'_>) -> Result<()> {
    let stylesheet = ctx.layout().spark_theme();
    info!("publishing theme {stylesheet}");
    let coordinate = ctx
        .artifact(FRAMEWORK_GROUP_ID, "spark", ArtifactKind::Stylesheet)?
        .with_classifier(Classifier::Theme);
    ctx.publish(&coordinate, &stylesheet)
}
