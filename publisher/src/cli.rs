//! CLI argument definitions for the Flex SDK publisher.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::pipeline::PipelineConfig;
use crate::sdk::SdkLayout;
use crate::version::VersionSet;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Repository id used for credentials lookup when `--repository-id` is not
/// given.
pub const DEFAULT_REPOSITORY_ID: &str = "remote-repository";

/// Publish an unpacked Flex SDK into a Maven repository.
#[derive(Parser, Debug)]
#[command(name = "flex-sdk-publisher")]
#[command(version, about)]
#[command(long_about = concat!(
    "Publish an unpacked Flex SDK into a Maven repository.\n\n",
    "Every framework library, locale resource bundle, theme, configuration ",
    "bundle and compiler jar in the SDK tree becomes a Maven artifact with a ",
    "generated POM. Three aggregate POMs (flex-framework-small, ",
    "air-framework-small and compiler) reference the small SDK subsets.\n\n",
    "`install` writes into the local repository; `deploy` additionally uploads ",
    "every artifact to a remote repository.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install into ~/.m2/repository:\n",
    "    $ flex-sdk-publisher install --home /opt/flex_sdk_4.1\n\n",
    "  Install without the compiler jars:\n",
    "    $ flex-sdk-publisher install --home /opt/flex_sdk_4.1 --skip-compiler\n\n",
    "  Deploy to a remote repository:\n",
    "    $ flex-sdk-publisher deploy --home /opt/flex_sdk_4.1 \\\n",
    "        --url https://repo.example.com/releases --repository-id releases\n\n",
    "  Preview a run:\n",
    "    $ flex-sdk-publisher install --home /opt/flex_sdk_4.1 --dry-run",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Publish into the local repository.
    Install(InstallArgs),

    /// Publish into the local repository and a remote repository.
    Deploy(DeployArgs),
}

/// Arguments shared by every subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InstallArgs {
    /// Root of the unpacked Flex SDK.
    #[arg(long, value_name = "DIR")]
    pub home: Utf8PathBuf,

    /// Root of the compiler tree [default: the SDK root].
    #[arg(long, value_name = "DIR")]
    pub compiler_home: Option<Utf8PathBuf>,

    /// SDK version [default: read from flex-sdk-description.xml].
    #[arg(long, value_name = "VERSION")]
    pub sdk_version: Option<String>,

    /// AIR runtime version [default: read from the AIR Info.plist].
    #[arg(long, value_name = "VERSION")]
    pub air_version: Option<String>,

    /// Skip the runtime shared library phase.
    #[arg(long)]
    pub skip_rsls: bool,

    /// Skip the compiler jar phase.
    #[arg(long)]
    pub skip_compiler: bool,

    /// Local repository [default: settings file, then ~/.m2/repository].
    #[arg(long, value_name = "DIR")]
    pub local_repository: Option<Utf8PathBuf>,

    /// Settings file [default: platform config directory].
    #[arg(long, value_name = "FILE")]
    pub settings: Option<Utf8PathBuf>,

    /// Log every artifact without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Arguments for the deploy command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DeployArgs {
    /// Arguments shared with `install`.
    #[command(flatten)]
    pub install: InstallArgs,

    /// Deployment repository URL (`file://`, `http://` or `https://`).
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Server id whose credentials are used for the upload.
    #[arg(long, value_name = "ID", default_value = DEFAULT_REPOSITORY_ID)]
    pub repository_id: String,
}

impl Default for InstallArgs {
    /// Creates an `InstallArgs` for the current directory with every flag
    /// disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_sdk_publisher::cli::InstallArgs;
    ///
    /// let args = InstallArgs::default();
    /// assert_eq!(args.home, ".");
    /// assert!(!args.skip_compiler);
    /// assert!(args.sdk_version.is_none());
    /// ```
    fn default() -> Self {
        Self {
            home: Utf8PathBuf::from("."),
            compiler_home: None,
            sdk_version: None,
            air_version: None,
            skip_rsls: false,
            skip_compiler: false,
            local_repository: None,
            settings: None,
            dry_run: false,
            verbosity: 0,
            quiet: false,
        }
    }
}

impl InstallArgs {
    /// Return the SDK layout named by `--home` and `--compiler-home`.
    #[must_use]
    pub fn layout(&self) -> SdkLayout {
        SdkLayout::new(self.home.clone(), self.compiler_home.clone())
    }

    /// Build the pipeline configuration for the resolved `versions`.
    #[must_use]
    pub fn pipeline_config(&self, versions: VersionSet) -> PipelineConfig {
        PipelineConfig {
            skip_rsls: self.skip_rsls,
            skip_compiler: self.skip_compiler,
            ..PipelineConfig::new(self.layout(), versions)
        }
    }

    /// Return the default log filter for `-q` and `-v`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_sdk_publisher::cli::InstallArgs;
    ///
    /// let args = InstallArgs { verbosity: 1, ..InstallArgs::default() };
    /// assert_eq!(args.log_level(), log::LevelFilter::Debug);
    /// ```
    #[must_use]
    pub const fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbosity {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// Returns the arguments shared by every subcommand.
    #[must_use]
    pub const fn install_args(&self) -> &InstallArgs {
        match &self.command {
            Command::Install(args) => args,
            Command::Deploy(args) => &args.install,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
