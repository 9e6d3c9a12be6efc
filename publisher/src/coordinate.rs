//! Artifact coordinates for published SDK artifacts.
//!
//! A [`Coordinate`] uniquely addresses one publishable unit in a Maven
//! repository: group, name, version, packaging kind and an optional
//! classifier. The repository stores derive every file path from it.

use camino::Utf8PathBuf;
use std::fmt;

/// Group id for framework libraries, locale bundles, themes and configs.
pub const FRAMEWORK_GROUP_ID: &str = "com.adobe.flex.framework";

/// Group id for compiler tool jars.
pub const COMPILER_GROUP_ID: &str = "com.adobe.flex.compiler";

/// Group id for the compiler aggregate POM.
pub const COMPILER_AGGREGATE_GROUP_ID: &str = "com.adobe.flex";

/// Packaging kind of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// A compiled `.swc` library.
    Library,
    /// A locale resource-bundle library (`rb.swc`).
    ResourceBundle,
    /// A jar: compiler tools and source archives.
    Tool,
    /// A POM-only artifact, such as an aggregate.
    Manifest,
    /// A `.css` theme stylesheet.
    Stylesheet,
    /// A `.zip` bundle, such as the configuration files.
    Archive,
}

impl ArtifactKind {
    /// Return the Maven packaging type, which is also the file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_sdk_publisher::coordinate::ArtifactKind;
    ///
    /// assert_eq!(ArtifactKind::ResourceBundle.packaging(), "rb.swc");
    /// assert_eq!(ArtifactKind::Manifest.packaging(), "pom");
    /// ```
    #[must_use]
    pub const fn packaging(self) -> &'static str {
        match self {
            Self::Library => "swc",
            Self::ResourceBundle => "rb.swc",
            Self::Tool => "jar",
            Self::Manifest => "pom",
            Self::Stylesheet => "css",
            Self::Archive => "zip",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.packaging())
    }
}

/// Secondary qualifier distinguishing artifacts that share a name and version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classifier {
    /// A theme stylesheet.
    Theme,
    /// The zipped framework configuration files.
    Configs,
    /// A source archive.
    Sources,
    /// A locale resource bundle, named by its locale code (e.g. `fr_FR`).
    Locale(String),
}

impl Classifier {
    /// Return the classifier as it appears in file names and POMs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Theme => "theme",
            Self::Configs => "configs",
            Self::Sources => "sources",
            Self::Locale(code) => code,
        }
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unique address of a publishable artifact.
///
/// # Examples
///
/// ```
/// use flex_sdk_publisher::coordinate::{ArtifactKind, Classifier, Coordinate};
///
/// let theme = Coordinate::new("com.adobe.flex.framework", "spark", "4.1.0.16076", ArtifactKind::Stylesheet)
///     .with_classifier(Classifier::Theme);
/// assert_eq!(theme.file_name(), "spark-4.1.0.16076-theme.css");
/// assert_eq!(theme.pom_file_name(), "spark-4.1.0.16076.pom");
/// assert_eq!(theme.to_string(), "com.adobe.flex.framework:spark:css:theme:4.1.0.16076");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group: String,
    name: String,
    version: String,
    kind: ArtifactKind,
    classifier: Option<Classifier>,
}

impl Coordinate {
    /// Create an unclassified coordinate.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        kind: ArtifactKind,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            kind,
            classifier: None,
        }
    }

    /// Return a copy of this coordinate carrying `classifier`.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Return the group id.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Return the artifact name (Maven artifact id).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Return the packaging kind.
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Return the classifier, if any.
    #[must_use]
    pub const fn classifier(&self) -> Option<&Classifier> {
        self.classifier.as_ref()
    }

    /// Return the payload file name: `<name>-<version>[-<classifier>].<ext>`.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.classifier.as_ref().map_or_else(
            || format!("{}-{}.{}", self.name, self.version, self.kind),
            |classifier| format!("{}-{}-{classifier}.{}", self.name, self.version, self.kind),
        )
    }

    /// Return the POM file name shared by every classifier of this version.
    #[must_use]
    pub fn pom_file_name(&self) -> String {
        format!("{}-{}.pom", self.name, self.version)
    }

    /// Return the repository directory holding all versions of the artifact.
    #[must_use]
    pub fn artifact_directory(&self) -> Utf8PathBuf {
        let mut path: Utf8PathBuf = self.group.split('.').collect();
        path.push(&self.name);
        path
    }

    /// Return the repository directory holding this version's files.
    #[must_use]
    pub fn version_directory(&self) -> Utf8PathBuf {
        self.artifact_directory().join(&self.version)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.kind)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::library(ArtifactKind::Library, "swc")]
    #[case::bundle(ArtifactKind::ResourceBundle, "rb.swc")]
    #[case::tool(ArtifactKind::Tool, "jar")]
    #[case::manifest(ArtifactKind::Manifest, "pom")]
    #[case::stylesheet(ArtifactKind::Stylesheet, "css")]
    #[case::archive(ArtifactKind::Archive, "zip")]
    fn packaging_matches_maven_type(#[case] kind: ArtifactKind, #[case] expected: &str) {
        assert_eq!(kind.packaging(), expected);
    }

    #[test]
    fn locale_bundle_file_name_carries_locale() {
        let bundle = Coordinate::new(
            FRAMEWORK_GROUP_ID,
            "framework",
            "4.1.0.1",
            ArtifactKind::ResourceBundle,
        )
        .with_classifier(Classifier::Locale("fr_FR".to_owned()));
        assert_eq!(bundle.file_name(), "framework-4.1.0.1-fr_FR.rb.swc");
    }

    #[test]
    fn group_maps_to_nested_directories() {
        let tool = Coordinate::new(COMPILER_GROUP_ID, "mxmlc", "4.1.0.1", ArtifactKind::Tool);
        assert_eq!(
            tool.version_directory(),
            Utf8PathBuf::from("com/adobe/flex/compiler/mxmlc/4.1.0.1")
        );
    }

    #[test]
    fn unclassified_display_omits_classifier() {
        let lib = Coordinate::new(FRAMEWORK_GROUP_ID, "spark", "4.1.0", ArtifactKind::Library);
        assert_eq!(lib.to_string(), "com.adobe.flex.framework:spark:swc:4.1.0");
        assert!(lib.classifier().is_none());
    }

    #[test]
    fn classified_and_unclassified_differ() {
        let lib = Coordinate::new(FRAMEWORK_GROUP_ID, "spark", "1", ArtifactKind::Tool);
        let sources = lib.clone().with_classifier(Classifier::Sources);
        assert_ne!(lib, sources);
        assert_eq!(lib.pom_file_name(), sources.pom_file_name());
    }
}
