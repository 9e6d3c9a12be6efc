//! Version descriptors shipped inside an SDK tree.
//!
//! The SDK version comes from `flex-sdk-description.xml`, joining the
//! `<version>` and `<build>` elements with a dot. The AIR runtime version
//! comes from the `CFBundleVersion` entry of the bundled AIR `Info.plist`.
//! Either may be overridden on the command line.

use crate::error::{PublisherError, Result};
use crate::sdk::SdkLayout;
use crate::version::VersionSet;
use camino::Utf8Path;
use log::debug;
use regex::Regex;
use std::fs;
use std::io;
use std::sync::OnceLock;

/// Extract `<version>.<build>` from the contents of an SDK descriptor.
///
/// # Errors
///
/// Returns [`PublisherError::Configuration`] if either element is missing
/// or empty.
///
/// # Examples
///
/// ```
/// use flex_sdk_publisher::descriptor::parse_sdk_version;
///
/// let xml = "<flex-sdk-description><version>4.1.0</version><build>16076</build></flex-sdk-description>";
/// assert_eq!(parse_sdk_version(xml).expect("valid descriptor"), "4.1.0.16076");
/// ```
pub fn parse_sdk_version(contents: &str) -> Result<String> {
    let version = element_text(contents, version_element(), "version")?;
    let build = element_text(contents, build_element(), "build")?;
    Ok(format!("{version}.{build}"))
}

/// Extract the `CFBundleVersion` string from the contents of an `Info.plist`.
///
/// # Errors
///
/// Returns [`PublisherError::Configuration`] if the entry is absent.
pub fn parse_air_version(contents: &str) -> Result<String> {
    bundle_version_entry()
        .captures(contents)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().trim().to_owned())
        .ok_or_else(|| {
            PublisherError::configuration("AIR descriptor has no CFBundleVersion entry")
        })
}

/// Read the SDK version from `path`.
///
/// # Errors
///
/// Returns [`PublisherError::Io`] if the file cannot be read and
/// [`PublisherError::Configuration`] if it is malformed.
pub fn read_sdk_version(path: &Utf8Path) -> Result<String> {
    let contents = fs::read_to_string(path).map_err(|e| PublisherError::io(path, e))?;
    parse_sdk_version(&contents)
}

/// Read the AIR version from `path`, returning `None` if the file is absent.
///
/// # Errors
///
/// Returns [`PublisherError::Io`] for read failures other than a missing
/// file, and [`PublisherError::Configuration`] if the file has no
/// `CFBundleVersion` entry.
pub fn read_air_version(path: &Utf8Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_air_version(&contents).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no AIR descriptor at {path}; AIR version unknown");
            Ok(None)
        }
        Err(e) => Err(PublisherError::io(path, e)),
    }
}

/// Establish the versions for a run, preferring explicit overrides.
///
/// # Errors
///
/// Propagates descriptor read and parse failures for any version that was
/// not overridden.
pub fn resolve_versions(
    layout: &SdkLayout,
    sdk_override: Option<String>,
    air_override: Option<String>,
) -> Result<VersionSet> {
    let sdk = match sdk_override {
        Some(version) => version,
        None => read_sdk_version(&layout.sdk_descriptor())?,
    };
    let air = match air_override {
        Some(version) => Some(version),
        None => read_air_version(&layout.air_descriptor())?,
    };
    debug!(
        "SDK version {sdk}, AIR version {}",
        air.as_deref().unwrap_or("unknown")
    );
    Ok(VersionSet::new(sdk, air))
}

fn element_text(contents: &str, pattern: &Regex, element: &str) -> Result<String> {
    pattern
        .captures(contents)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().to_owned())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            PublisherError::configuration(format!("SDK descriptor has no <{element}> element"))
        })
}

fn version_element() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"<version>\s*([^<]*?)\s*</version>"))
}

fn build_element() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"<build>\s*([^<]*?)\s*</build>"))
}

fn bundle_version_entry() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"<key>CFBundleVersion</key>\s*<string>(.*)</string>"))
}

#[expect(clippy::expect_used, reason = "descriptor patterns are string literals")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("descriptor pattern is valid")
}
