//! POM manifests for published artifacts.
//!
//! Every payload is published with a minimal POM describing its coordinates
//! and packaging. Aggregate artifacts are POM-only and list their members
//! as dependencies:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <project xmlns="http://maven.apache.org/POM/4.0.0" ...>
//!   <modelVersion>4.0.0</modelVersion>
//!   <groupId>com.adobe.flex.framework</groupId>
//!   <artifactId>flex-framework-small</artifactId>
//!   <version>4.1.0.16076</version>
//!   <packaging>pom</packaging>
//!   <description>POM was created by flex-sdk-publisher</description>
//!   <dependencies>...</dependencies>
//! </project>
//! ```

use crate::coordinate::{ArtifactKind, Coordinate};
use camino::Utf8Path;
use std::fs;
use std::io;

/// The only POM model version Maven understands.
pub const MODEL_VERSION: &str = "4.0.0";

/// Provenance note written into every generated POM.
pub const DESCRIPTION: &str = "POM was created by flex-sdk-publisher";

const PROJECT_OPEN: &str = concat!(
    r#"<project xmlns="http://maven.apache.org/POM/4.0.0" "#,
    r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
    r#"xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 "#,
    r#"http://maven.apache.org/xsd/maven-4.0.0.xsd">"#,
);

/// One `<dependency>` entry of an aggregate POM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Group id of the member.
    pub group_id: String,
    /// Artifact id of the member.
    pub artifact_id: String,
    /// Version of the member.
    pub version: String,
    /// Packaging type; omitted from the document when it is `jar`.
    pub kind: ArtifactKind,
    /// Classifier, if the member has one.
    pub classifier: Option<String>,
}

impl From<&Coordinate> for Dependency {
    fn from(coordinate: &Coordinate) -> Self {
        Self {
            group_id: coordinate.group().to_owned(),
            artifact_id: coordinate.name().to_owned(),
            version: coordinate.version().to_owned(),
            kind: coordinate.kind(),
            classifier: coordinate.classifier().map(|c| c.as_str().to_owned()),
        }
    }
}

/// A minimal Maven project model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pom {
    group_id: String,
    artifact_id: String,
    version: String,
    packaging: &'static str,
    dependencies: Vec<Dependency>,
}

impl Pom {
    /// Build the POM describing a single artifact.
    #[must_use]
    pub fn for_coordinate(coordinate: &Coordinate) -> Self {
        Self {
            group_id: coordinate.group().to_owned(),
            artifact_id: coordinate.name().to_owned(),
            version: coordinate.version().to_owned(),
            packaging: coordinate.kind().packaging(),
            dependencies: Vec::new(),
        }
    }

    /// Build an aggregate POM whose dependencies are `members`, in order.
    #[must_use]
    pub fn aggregate(coordinate: &Coordinate, members: &[Coordinate]) -> Self {
        Self {
            dependencies: members.iter().map(Dependency::from).collect(),
            ..Self::for_coordinate(coordinate)
        }
    }

    /// Return the dependencies in declaration order.
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Render the POM document.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_sdk_publisher::coordinate::{ArtifactKind, Coordinate};
    /// use flex_sdk_publisher::pom::Pom;
    ///
    /// let spark = Coordinate::new("com.adobe.flex.framework", "spark", "4.1.0.16076", ArtifactKind::Library);
    /// let xml = Pom::for_coordinate(&spark).render();
    /// assert!(xml.contains("<artifactId>spark</artifactId>"));
    /// assert!(xml.contains("<packaging>swc</packaging>"));
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut xml = String::with_capacity(512);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(PROJECT_OPEN);
        xml.push('\n');
        element(&mut xml, 1, "modelVersion", MODEL_VERSION);
        element(&mut xml, 1, "groupId", &self.group_id);
        element(&mut xml, 1, "artifactId", &self.artifact_id);
        element(&mut xml, 1, "version", &self.version);
        element(&mut xml, 1, "packaging", self.packaging);
        element(&mut xml, 1, "description", DESCRIPTION);

        if !self.dependencies.is_empty() {
            xml.push_str("  <dependencies>\n");
            for dependency in &self.dependencies {
                render_dependency(&mut xml, dependency);
            }
            xml.push_str("  </dependencies>\n");
        }

        xml.push_str("</project>\n");
        xml
    }

    /// Render the POM into `path`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be written.
    pub fn write_to(&self, path: &Utf8Path) -> io::Result<()> {
        fs::write(path, self.render())
    }
}

fn render_dependency(xml: &mut String, dependency: &Dependency) {
    xml.push_str("    <dependency>\n");
    element(xml, 3, "groupId", &dependency.group_id);
    element(xml, 3, "artifactId", &dependency.artifact_id);
    element(xml, 3, "version", &dependency.version);
    if dependency.kind != ArtifactKind::Tool {
        element(xml, 3, "type", dependency.kind.packaging());
    }
    if let Some(classifier) = &dependency.classifier {
        element(xml, 3, "classifier", classifier);
    }
    xml.push_str("    </dependency>\n");
}

/// Append `<name>text</name>` at `depth` two-space indents.
pub(crate) fn element(xml: &mut String, depth: usize, name: &str, text: &str) {
    xml.push_str(&"  ".repeat(depth));
    xml.push_str(&format!("<{name}>{}</{name}>\n", escape(text)));
}

/// Escape XML character data.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
