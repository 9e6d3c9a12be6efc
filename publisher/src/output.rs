//! Output formatting for the publisher CLI.
//!
//! This module renders the run plan shown before publishing, the summary
//! shown after a successful run, and error reports with their full cause
//! chain. Everything is written to stderr; logging goes through the `log`
//! facade separately.

use crate::pipeline::RunSummary;
use crate::sdk::SdkLayout;
use crate::subsets::SubsetKind;
use crate::version::VersionSet;
use camino::Utf8Path;
use std::error::Error;
use std::io::Write;

/// Write one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; nothing useful can be done on failure.
    }
}

/// Format a success message after publishing.
#[must_use]
pub fn success_message(count: usize, destination: &str) -> String {
    let plural = if count == 1 { "artifact" } else { "artifacts" };
    format!("Successfully published {count} {plural} to {destination}")
}

/// Format the aggregates of a finished run with their member counts.
#[must_use]
pub fn summary_text(summary: &RunSummary) -> String {
    let mut lines = vec!["Aggregates:".to_owned()];
    for (kind, coordinate) in SubsetKind::ALL.iter().zip(summary.aggregates()) {
        let size = summary.subset_size(*kind);
        let plural = if size == 1 { "member" } else { "members" };
        lines.push(format!("  - {coordinate} ({size} {plural})"));
    }
    lines.join("\n")
}

/// Render `error` followed by every error in its source chain.
///
/// # Example
///
/// ```
/// use flex_sdk_publisher::error::PublisherError;
/// use flex_sdk_publisher::output::error_report;
///
/// let err = PublisherError::io(
///     camino::Utf8Path::new("/sdk/flex-sdk-description.xml"),
///     std::io::Error::other("permission denied"),
/// );
/// let report = error_report(&err);
/// assert!(report.starts_with("error: I/O error at /sdk/flex-sdk-description.xml"));
/// assert!(report.contains("caused by: permission denied"));
/// ```
#[must_use]
pub fn error_report(error: &dyn Error) -> String {
    let mut report = format!("error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        report.push_str("\n  caused by: ");
        report.push_str(&cause.to_string());
        source = cause.source();
    }
    report
}

/// What a run is about to do, shown before publishing starts.
#[derive(Debug)]
pub struct RunPlan<'a> {
    /// SDK and compiler trees.
    pub layout: &'a SdkLayout,
    /// Resolved versions.
    pub versions: &'a VersionSet,
    /// Local repository root.
    pub local_repository: &'a Utf8Path,
    /// Deployment URL, for `deploy`.
    pub remote: Option<&'a str>,
    /// Whether the RSL phase is skipped.
    pub skip_rsls: bool,
    /// Whether the compiler phase is skipped.
    pub skip_compiler: bool,
    /// Whether nothing will be written.
    pub dry_run: bool,
}

impl RunPlan<'_> {
    /// Format the plan for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut lines = Vec::new();
        if self.dry_run {
            lines.push("Dry run - no files will be written".to_owned());
            lines.push(String::new());
        }
        lines.push(format!("SDK home: {}", self.layout.home()));
        lines.push(format!("Compiler home: {}", self.layout.compiler_home()));
        lines.push(format!("SDK version: {}", self.versions.sdk()));
        let air = self.versions.air().unwrap_or("unknown");
        lines.push(format!("AIR version: {air}"));
        lines.push(format!("Local repository: {}", self.local_repository));
        if let Some(remote) = self.remote {
            lines.push(format!("Deployment repository: {remote}"));
        }
        lines.push(format!("Skip RSLs: {}", self.skip_rsls));
        lines.push(format!("Skip compiler: {}", self.skip_compiler));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};

    #[fixture]
    fn layout() -> SdkLayout {
        SdkLayout::new(Utf8PathBuf::from("/opt/flex"), None)
    }

    #[rstest]
    #[case::singular(1, "1 artifact to")]
    #[case::plural(13, "13 artifacts to")]
    fn success_message_pluralises_correctly(#[case] count: usize, #[case] expected: &str) {
        let msg = success_message(count, "/tmp/m2");
        assert!(msg.contains(expected));
        assert!(msg.ends_with("/tmp/m2"));
    }

    #[rstest]
    fn plan_lists_install_configuration(layout: SdkLayout) {
        let versions = VersionSet::new("4.1.0.16076", None);
        let local = Utf8PathBuf::from("/home/user/.m2/repository");
        let plan = RunPlan {
            layout: &layout,
            versions: &versions,
            local_repository: &local,
            remote: None,
            skip_rsls: false,
            skip_compiler: true,
            dry_run: false,
        };

        let text = plan.display_text();

        assert!(text.contains("SDK home: /opt/flex"));
        assert!(text.contains("Compiler home: /opt/flex"));
        assert!(text.contains("AIR version: unknown"));
        assert!(text.contains("Skip compiler: true"));
        assert!(!text.contains("Deployment repository"));
        assert!(!text.contains("Dry run"));
    }

    #[rstest]
    fn plan_marks_dry_run_deploys(layout: SdkLayout) {
        let versions = VersionSet::new("4.1.0.16076", Some("2.0.2.12610".to_owned()));
        let local = Utf8PathBuf::from("/tmp/m2");
        let plan = RunPlan {
            layout: &layout,
            versions: &versions,
            local_repository: &local,
            remote: Some("https://repo.example.test/releases"),
            skip_rsls: true,
            skip_compiler: false,
            dry_run: true,
        };

        let text = plan.display_text();

        assert!(text.starts_with("Dry run"));
        assert!(text.contains("AIR version: 2.0.2.12610"));
        assert!(text.contains("Deployment repository: https://repo.example.test/releases"));
    }

    #[test]
    fn error_report_without_source_is_one_line() {
        let err = crate::error::PublisherError::configuration("no SDK home");
        assert_eq!(
            error_report(&err),
            "error: configuration error: no SDK home"
        );
    }

    #[test]
    fn archive_failures_name_the_cause_once() {
        let err = crate::error::PublisherError::from(crate::archive::ArchiveError::Zip(
            zip::result::ZipError::FileNotFound,
        ));

        let report = error_report(&err);

        assert!(report.starts_with("error: archive creation failed\n"));
        assert!(report.contains("caused by: zip writer failed"));
        assert_eq!(report.matches("file not found").count(), 1);
    }

    #[test]
    fn summary_lists_every_aggregate_with_its_size() {
        use crate::pipeline::{Pipeline, PipelineConfig};
        use crate::publisher::PublishTargets;
        use crate::test_utils::{RecordingStore, SDK_VERSION, SdkTree};

        let tree = SdkTree::new();
        tree.library("spark.swc").library("rpc.swc");
        let config = PipelineConfig::new(
            SdkLayout::new(tree.root().to_owned(), None),
            VersionSet::new(SDK_VERSION, None),
        );
        let targets = PublishTargets::install(Box::new(RecordingStore::new()));
        let summary = Pipeline::new(&config, &targets)
            .run()
            .expect("run succeeds");

        let text = summary_text(&summary);

        assert!(text.contains(&format!("flex-framework-small:pom:{SDK_VERSION} (2 members)")));
        assert!(text.contains(&format!("air-framework-small:pom:{SDK_VERSION} (2 members)")));
        assert!(text.contains(&format!("com.adobe.flex:compiler:pom:{SDK_VERSION} (0 members)")));
    }

    #[test]
    fn write_stderr_line_appends_newline() {
        let mut stderr = Vec::new();
        write_stderr_line(&mut stderr, "hello");
        assert_eq!(stderr, b"hello\n");
    }
}
