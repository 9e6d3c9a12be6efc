//! Artifact-level `maven-metadata` documents.
//!
//! Each store keeps one metadata file per (group, name) listing every
//! version it holds. Existing documents are read back with a pattern match
//! over the `<versions>` block; only the fields written here are preserved.

use crate::pom::{element, escape};
use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;

/// Metadata file maintained by the local repository.
pub const LOCAL_METADATA: &str = "maven-metadata-local.xml";

/// Metadata file maintained by deployment repositories.
pub const REMOTE_METADATA: &str = "maven-metadata.xml";

fn versions_block() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"(?s)<versions>(.*?)</versions>"))
}

fn version_entry() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"<version>\s*([^<]+?)\s*</version>"))
}

#[expect(clippy::expect_used, reason = "metadata patterns are string literals")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("metadata pattern is valid")
}

/// Versions known for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMetadata {
    group_id: String,
    artifact_id: String,
    versions: Vec<String>,
}

impl VersionMetadata {
    /// Create metadata listing no versions.
    #[must_use]
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            versions: Vec::new(),
        }
    }

    /// Read the versions listed in an existing document.
    ///
    /// Unrecognized content yields an empty version list.
    #[must_use]
    pub fn parse(group_id: &str, artifact_id: &str, document: &str) -> Self {
        let mut metadata = Self::new(group_id, artifact_id);
        let Some(block) = versions_block().captures(document).and_then(|c| c.get(1)) else {
            return metadata;
        };
        for captures in version_entry().captures_iter(block.as_str()) {
            if let Some(version) = captures.get(1) {
                metadata.add(version.as_str());
            }
        }
        metadata
    }

    /// Record `version`, keeping first-seen order. Returns false if it was
    /// already listed.
    pub fn add(&mut self, version: &str) -> bool {
        if self.versions.iter().any(|known| known == version) {
            return false;
        }
        self.versions.push(version.to_owned());
        true
    }

    /// Return the listed versions.
    #[must_use]
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Render the document, stamping `lastUpdated` with the current UTC time.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_at(&Utc::now().format("%Y%m%d%H%M%S").to_string())
    }

    fn render_at(&self, last_updated: &str) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<metadata>\n");
        element(&mut xml, 1, "groupId", &self.group_id);
        element(&mut xml, 1, "artifactId", &self.artifact_id);
        xml.push_str("  <versioning>\n");
        if let Some(latest) = self.versions.last() {
            element(&mut xml, 2, "release", latest);
        }
        xml.push_str("    <versions>\n");
        for version in &self.versions {
            xml.push_str("      <version>");
            xml.push_str(&escape(version));
            xml.push_str("</version>\n");
        }
        xml.push_str("    </versions>\n");
        element(&mut xml, 2, "lastUpdated", last_updated);
        xml.push_str("  </versioning>\n</metadata>\n");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_parses_share_compiled_patterns() {
        let first = VersionMetadata::parse("g", "a", "<versions><version>1</version></versions>");
        let second = VersionMetadata::parse("g", "a", "<versions><version>2</version></versions>");
        assert_eq!(first.versions(), ["1"]);
        assert_eq!(second.versions(), ["2"]);
        assert!(std::ptr::eq(versions_block(), versions_block()));
        assert!(std::ptr::eq(version_entry(), version_entry()));
    }

    #[test]
    fn render_lists_versions_and_release() {
        let mut metadata = VersionMetadata::new("com.adobe.flex.framework", "spark");
        metadata.add("4.1.0.16076");
        metadata.add("4.5.1.21328");
        let xml = metadata.render_at("20261018120000");

        assert!(xml.contains("<release>4.5.1.21328</release>"));
        assert!(xml.contains("      <version>4.1.0.16076</version>\n"));
        assert!(xml.contains("<lastUpdated>20261018120000</lastUpdated>"));
    }

    #[test]
    fn parse_reads_back_rendered_versions() {
        let mut metadata = VersionMetadata::new("g", "a");
        metadata.add("1");
        metadata.add("2");
        let parsed = VersionMetadata::parse("g", "a", &metadata.render());
        assert_eq!(parsed.versions(), ["1", "2"]);
    }

    #[test]
    fn add_ignores_known_versions() {
        let mut metadata = VersionMetadata::new("g", "a");
        assert!(metadata.add("1"));
        assert!(!metadata.add("1"));
        assert_eq!(metadata.versions().len(), 1);
    }

    #[test]
    fn parse_tolerates_foreign_documents() {
        let parsed = VersionMetadata::parse("g", "a", "<metadata><versioning/></metadata>");
        assert!(parsed.versions().is_empty());
    }

    #[test]
    fn parse_ignores_project_version_outside_versions_block() {
        let document = "<metadata><version>9</version><versioning><versions>\
                        <version>1</version></versions></versioning></metadata>";
        let parsed = VersionMetadata::parse("g", "a", document);
        assert_eq!(parsed.versions(), ["1"]);
    }
}
