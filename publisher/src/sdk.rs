//! Directory layout of an unpacked Flex SDK release.

use camino::{Utf8Path, Utf8PathBuf};

/// File holding the SDK `<version>` and `<build>` elements.
pub const SDK_DESCRIPTOR: &str = "flex-sdk-description.xml";

/// AIR runtime property list, relative to the SDK root.
pub const AIR_DESCRIPTOR: &str = "runtimes/air/mac/Adobe AIR.framework/Resources/Info.plist";

/// Paths into an SDK tree and, optionally, a separate compiler tree.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use flex_sdk_publisher::sdk::SdkLayout;
///
/// let layout = SdkLayout::new(Utf8PathBuf::from("/opt/flex"), None);
/// assert_eq!(layout.libraries(), "/opt/flex/frameworks/libs");
/// assert_eq!(layout.compiler_libraries(), "/opt/flex/lib");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkLayout {
    home: Utf8PathBuf,
    compiler_home: Utf8PathBuf,
}

impl SdkLayout {
    /// Create a layout rooted at `home`. The compiler tree defaults to the
    /// SDK root.
    #[must_use]
    pub fn new(home: Utf8PathBuf, compiler_home: Option<Utf8PathBuf>) -> Self {
        let compiler_home = compiler_home.unwrap_or_else(|| home.clone());
        Self {
            home,
            compiler_home,
        }
    }

    /// Return the SDK root.
    #[must_use]
    pub fn home(&self) -> &Utf8Path {
        &self.home
    }

    /// Return the compiler root.
    #[must_use]
    pub fn compiler_home(&self) -> &Utf8Path {
        &self.compiler_home
    }

    /// Return `frameworks`, holding the configuration files.
    #[must_use]
    pub fn frameworks(&self) -> Utf8PathBuf {
        self.home.join("frameworks")
    }

    /// Return `frameworks/libs`, the library root.
    #[must_use]
    pub fn libraries(&self) -> Utf8PathBuf {
        self.frameworks().join("libs")
    }

    /// Return `frameworks/locale`, the locale root.
    #[must_use]
    pub fn locales(&self) -> Utf8PathBuf {
        self.frameworks().join("locale")
    }

    /// Return `frameworks/projects`, the library source root.
    #[must_use]
    pub fn framework_sources(&self) -> Utf8PathBuf {
        self.frameworks().join("projects")
    }

    /// Return the Spark theme stylesheet.
    #[must_use]
    pub fn spark_theme(&self) -> Utf8PathBuf {
        self.frameworks().join("themes/Spark/spark.css")
    }

    /// Return `<compiler-home>/lib`, the compiler jar directory.
    #[must_use]
    pub fn compiler_libraries(&self) -> Utf8PathBuf {
        self.compiler_home.join("lib")
    }

    /// Return the SDK version descriptor.
    #[must_use]
    pub fn sdk_descriptor(&self) -> Utf8PathBuf {
        self.home.join(SDK_DESCRIPTOR)
    }

    /// Return the AIR runtime descriptor.
    #[must_use]
    pub fn air_descriptor(&self) -> Utf8PathBuf {
        self.home.join(AIR_DESCRIPTOR)
    }
}
