//! Classification tables for the Flex SDK layout.
//!
//! The scanners stay declarative: every per-name exception (small SDK
//! membership, version overrides, source-path remapping, compiler source
//! restrictions, deny-lists) lives in a lookup table here and is queried
//! through a small function.

/// Extension of compiled framework libraries.
pub const SWC_EXTENSION: &str = ".swc";

/// Extension of compiler tool jars.
pub const JAR_EXTENSION: &str = ".jar";

/// Trailing suffix of locale resource bundles (marker plus extension).
pub const RESOURCE_BUNDLE_SUFFIX: &str = "_rb.swc";

/// Library subdirectory scanned by the player-runtime classifier.
pub const PLAYER_DIRECTORY: &str = "player";

/// Artifact name and file name stem of the player runtime library.
pub const PLAYERGLOBAL: &str = "playerglobal";

/// Locale whose bundles are also published unclassified.
pub const CANONICAL_LOCALE: &str = "en_US";

/// Names that make up the "small SDK" profile.
pub const SMALL_SDK_ARTIFACTS: &[&str] = &[
    "airframework",
    "framework",
    "spark",
    "airspark",
    "airglobal",
];

/// Substring marking a small SDK artifact as AIR-only.
pub const RUNTIME_MARKER: &str = "air";

/// Names published under the AIR version rather than the SDK version.
pub const VERSION_OVERRIDES: &[&str] = &["airglobal", "adt"];

/// Library source directories that do not follow `<name>/src`.
pub const SWC_SOURCE_OVERRIDES: &[(&str, &str)] = &[
    ("applicationupdater", "air/ApplicationUpdater/src/ApplicationUpdater"),
    ("servicemonitor", "air/Core/src"),
];

/// Locale bundles that only contain documentation.
pub const DOCUMENTATION_ONLY_BUNDLES: &[&str] =
    &["playerglobal_rb.swc", "flash-integration_rb.swc"];

/// Framework configuration files bundled into the configs archive.
pub const CONFIG_INCLUDES: &[&str] = &["*.xml", "*.ser"];

/// Build files kept out of the configs archive.
pub const CONFIG_EXCLUDES: &[&str] = &[
    "build_framework.xml",
    "build.xml",
    "flash-unicode-table.xml",
    "metadata.xml",
];

/// Jars under the compiler `lib` directory that are never published.
pub const EXCLUDED_COMPILER_JARS: &[&str] = &[
    "smali.jar",
    "baksmali.jar",
    "compc.jar",
    "javacc.jar",
    "license.jar",
    "flexTasks.jar",
    "copylocale.jar",
    "swfdump.jar",
];

/// Prefixes of localized compiler jars.
pub const LOCALE_JAR_PREFIXES: &[&str] = &["mxmlc_", "batik_", "xercesImpl_"];

const FLEX_COMPILER_OEM_SOURCE_INCLUDES: &[&str] = &[
    "flex2/tools/oem/**/*",
    "flex2/tools/flexbuilder/**/*",
    "flex/license/*",
];

const MXMLC_SOURCE_INCLUDES: &[&str] = &[
    "**/*.properties",
    "flex2/compiler/**/*",
    "flex2/license/**/*",
    "flex2/linker/**/*",
    "flex2/tools/*",
    "flash/**/*",
    "flex/**/*",
];

/// Where the sources of a compiler jar live, relative to the compiler home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerSource {
    /// Source directory relative to the compiler home.
    pub path: &'static str,
    /// Include globs; empty means every file.
    pub includes: &'static [&'static str],
}

/// Compiler jars with a known source tree.
pub const COMPILER_SOURCES: &[(&str, CompilerSource)] = &[
    (
        "asc",
        CompilerSource {
            path: "modules/asc/src/java",
            includes: &[],
        },
    ),
    (
        "batik-all-flex",
        CompilerSource {
            path: "modules/thirdparty/batik/sources",
            includes: &[],
        },
    ),
    (
        "flex-compiler-oem",
        CompilerSource {
            path: "modules/compiler/src/java",
            includes: FLEX_COMPILER_OEM_SOURCE_INCLUDES,
        },
    ),
    (
        "mxmlc",
        CompilerSource {
            path: "modules/compiler/src/java",
            includes: MXMLC_SOURCE_INCLUDES,
        },
    ),
];

/// Which small-SDK aggregates an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetMembership {
    /// Not part of the small SDK.
    None,
    /// AIR-only: the AIR small framework.
    AirOnly,
    /// Both the AIR and the Flex small frameworks.
    AirAndFlex,
}

/// Classify `name` against the small SDK list and the runtime marker.
///
/// # Examples
///
/// ```
/// use flex_sdk_publisher::rules::{SubsetMembership, small_sdk_membership};
///
/// assert_eq!(small_sdk_membership("spark"), SubsetMembership::AirAndFlex);
/// assert_eq!(small_sdk_membership("airspark"), SubsetMembership::AirOnly);
/// assert_eq!(small_sdk_membership("mx"), SubsetMembership::None);
/// ```
#[must_use]
pub fn small_sdk_membership(name: &str) -> SubsetMembership {
    if !SMALL_SDK_ARTIFACTS.contains(&name) {
        SubsetMembership::None
    } else if name.contains(RUNTIME_MARKER) {
        SubsetMembership::AirOnly
    } else {
        SubsetMembership::AirAndFlex
    }
}

/// Return the source directory of a library, relative to `frameworks/projects`.
#[must_use]
pub fn swc_source_path(name: &str) -> String {
    SWC_SOURCE_OVERRIDES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map_or_else(|| format!("{name}/src"), |(_, path)| (*path).to_owned())
}

/// Return the source tree of a compiler jar, if one is known.
#[must_use]
pub fn compiler_source(name: &str) -> Option<&'static CompilerSource> {
    COMPILER_SOURCES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, source)| source)
}

/// Return true if `file_name` is a localized compiler jar.
#[must_use]
pub fn is_locale_jar(file_name: &str) -> bool {
    LOCALE_JAR_PREFIXES
        .iter()
        .any(|prefix| file_name.starts_with(prefix))
}

/// Return true if the compiler jar `file_name` should be published.
#[must_use]
pub fn is_publishable_compiler_jar(file_name: &str) -> bool {
    file_name.ends_with(JAR_EXTENSION)
        && !EXCLUDED_COMPILER_JARS.contains(&file_name)
        && !is_locale_jar(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::airframework("airframework", SubsetMembership::AirOnly)]
    #[case::framework("framework", SubsetMembership::AirAndFlex)]
    #[case::spark("spark", SubsetMembership::AirAndFlex)]
    #[case::airspark("airspark", SubsetMembership::AirOnly)]
    #[case::airglobal("airglobal", SubsetMembership::AirOnly)]
    #[case::rpc("rpc", SubsetMembership::None)]
    fn membership_follows_small_sdk_list(#[case] name: &str, #[case] expected: SubsetMembership) {
        assert_eq!(small_sdk_membership(name), expected);
    }

    #[rstest]
    #[case::updater("applicationupdater", "air/ApplicationUpdater/src/ApplicationUpdater")]
    #[case::monitor("servicemonitor", "air/Core/src")]
    #[case::default_layout("spark", "spark/src")]
    fn swc_sources_resolve_through_override_table(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(swc_source_path(name), expected);
    }

    #[test]
    fn compiler_source_table_covers_exactly_four_jars() {
        assert_eq!(COMPILER_SOURCES.len(), 4);
        assert!(compiler_source("asc").is_some_and(|s| s.includes.is_empty()));
        assert!(compiler_source("mxmlc").is_some_and(|s| s.includes.contains(&"flash/**/*")));
        assert!(compiler_source("flex-compiler-oem").is_some_and(|s| s.includes.len() == 3));
        assert!(compiler_source("fdb").is_none());
    }

    #[rstest]
    #[case::mxmlc("mxmlc.jar", true)]
    #[case::adt("adt.jar", true)]
    #[case::excluded("compc.jar", false)]
    #[case::localized("mxmlc_ja.jar", false)]
    #[case::xerces_locale("xercesImpl_ja.jar", false)]
    #[case::not_a_jar("mxmlc.properties", false)]
    fn compiler_jar_filter(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_publishable_compiler_jar(name), expected);
    }
}
