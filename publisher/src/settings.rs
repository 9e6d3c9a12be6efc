//! User settings: local repository location and server credentials.
//!
//! Settings live in a TOML file, by default
//! `<config dir>/flex-sdk-publisher/settings.toml`:
//!
//! ```toml
//! local_repository = "/srv/maven/local"
//!
//! [servers.remote-repository]
//! username = "deployer"
//! password = "secret"
//! ```
//!
//! Server tables are keyed by the repository id passed to `deploy`.

use crate::error::{PublisherError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories_next::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Credentials for one deployment server.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerCredentials {
    /// User name for basic authentication.
    pub username: String,
    /// Password for basic authentication.
    pub password: String,
}

impl fmt::Debug for ServerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parsed settings file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Local repository directory; defaults to `~/.m2/repository`.
    pub local_repository: Option<Utf8PathBuf>,
    /// Credentials keyed by repository id.
    pub servers: BTreeMap<String, ServerCredentials>,
}

impl Settings {
    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Configuration`] if the document is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_sdk_publisher::settings::Settings;
    ///
    /// let settings = Settings::parse("[servers.internal]\nusername = \"ci\"\npassword = \"pw\"\n")
    ///     .expect("valid settings");
    /// assert_eq!(settings.server("internal").map(|s| s.username.as_str()), Some("ci"));
    /// ```
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| PublisherError::configuration(format!("invalid settings: {e}")))
    }

    /// Load settings from `path`, or from [`default_path`] when `None`.
    ///
    /// A missing default file yields default settings; a missing explicit
    /// file is an error.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Io`] if an explicit file cannot be read and
    /// [`PublisherError::Configuration`] if the contents are invalid.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_owned(), true),
            None => match default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };
        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if !explicit && e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(PublisherError::io(&path, e)),
        }
    }

    /// Return the credentials registered for `repository_id`.
    #[must_use]
    pub fn server(&self, repository_id: &str) -> Option<&ServerCredentials> {
        self.servers.get(repository_id)
    }

    /// Resolve the local repository: `cli` first, then the settings file,
    /// then `~/.m2/repository`.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Configuration`] if no home directory can be
    /// determined for the default.
    pub fn local_repository(&self, cli: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
        if let Some(path) = cli.or(self.local_repository.as_deref()) {
            return Ok(path.to_owned());
        }
        default_local_repository().ok_or_else(|| {
            PublisherError::configuration(
                "cannot determine the home directory; pass --local-repository",
            )
        })
    }
}

/// Return the default settings file location.
#[must_use]
pub fn default_path() -> Option<Utf8PathBuf> {
    let dirs = ProjectDirs::from("", "", "flex-sdk-publisher")?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().join(SETTINGS_FILE)).ok()
}

/// Return `~/.m2/repository`.
#[must_use]
pub fn default_local_repository() -> Option<Utf8PathBuf> {
    let dirs = BaseDirs::new()?;
    Utf8PathBuf::from_path_buf(dirs.home_dir().join(".m2").join("repository")).ok()
}
