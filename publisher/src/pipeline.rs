//! Phase-ordered pipeline driver.
//!
//! A run walks a fixed sequence of phases, one classifier per SDK subtree,
//! and finishes by publishing the aggregate POMs. Every phase completes
//! before the next starts and the first error stops the run. The two scratch
//! files (generated payloads and generated POMs) live for exactly one run
//! and are removed whether it succeeds or fails. Artifacts that were already
//! published are never retracted.

use crate::aggregator::build_aggregators;
use crate::coordinate::Coordinate;
use crate::error::{PublisherError, Result};
use crate::publisher::{PublishTargets, Publisher};
use crate::scan::{
    RunContext, scan_compiler, scan_configs, scan_libraries, scan_locales, scan_rsls, scan_themes,
};
use crate::sdk::SdkLayout;
use crate::subsets::{SubsetKind, Subsets};
use crate::version::VersionSet;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, error, info};
use std::fmt;
use tempfile::TempPath;
use thiserror::Error;

/// Prefix of every scratch file name.
const SCRATCH_PREFIX: &str = "mvninstall";

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The SDK and compiler trees to scan.
    pub layout: SdkLayout,
    /// The SDK and AIR versions.
    pub versions: VersionSet,
    /// Skip the RSL phase.
    pub skip_rsls: bool,
    /// Skip the compiler tool phase.
    pub skip_compiler: bool,
    /// Directory for the scratch files; the system temporary directory when
    /// absent.
    pub scratch_dir: Option<Utf8PathBuf>,
}

impl PipelineConfig {
    /// Create a configuration running every phase.
    #[must_use]
    pub const fn new(layout: SdkLayout, versions: VersionSet) -> Self {
        Self {
            layout,
            versions,
            skip_rsls: false,
            skip_compiler: false,
            scratch_dir: None,
        }
    }
}

/// The states of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Scratch files are being created.
    Init,
    /// `frameworks/libs`, including the player runtime.
    ScanLibraries,
    /// `frameworks/locale`.
    ScanLocales,
    /// The configuration bundle.
    ScanConfigs,
    /// The Spark theme.
    ScanThemes,
    /// Runtime shared libraries.
    ScanRsls,
    /// `<compiler-home>/lib`.
    ScanCompiler,
    /// Aggregate POMs for the tracked subsets.
    BuildAggregators,
    /// The run finished.
    Done,
    /// A phase returned a fatal error; no further phase runs.
    Failed,
}

impl Phase {
    /// Return the phase that follows `self`, skipping the optional phases
    /// the flags disable.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_sdk_publisher::pipeline::Phase;
    ///
    /// assert_eq!(Phase::ScanThemes.next(true, false), Phase::ScanCompiler);
    /// assert_eq!(Phase::ScanThemes.next(true, true), Phase::BuildAggregators);
    /// assert_eq!(Phase::Done.next(false, false), Phase::Done);
    /// assert_eq!(Phase::Failed.next(false, false), Phase::Failed);
    /// ```
    #[must_use]
    pub const fn next(self, skip_rsls: bool, skip_compiler: bool) -> Self {
        match self {
            Self::Init => Self::ScanLibraries,
            Self::ScanLibraries => Self::ScanLocales,
            Self::ScanLocales => Self::ScanConfigs,
            Self::ScanConfigs => Self::ScanThemes,
            Self::ScanThemes if !skip_rsls => Self::ScanRsls,
            Self::ScanThemes | Self::ScanRsls if !skip_compiler => Self::ScanCompiler,
            Self::ScanThemes | Self::ScanRsls | Self::ScanCompiler => Self::BuildAggregators,
            Self::BuildAggregators | Self::Done => Self::Done,
            Self::Failed => Self::Failed,
        }
    }

    /// Return true for the states that end a run.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Init => "initialisation",
            Self::ScanLibraries => "library scan",
            Self::ScanLocales => "locale scan",
            Self::ScanConfigs => "configuration bundle",
            Self::ScanThemes => "theme scan",
            Self::ScanRsls => "RSL scan",
            Self::ScanCompiler => "compiler scan",
            Self::BuildAggregators => "aggregate build",
            Self::Done => "completion",
            Self::Failed => "failure",
        })
    }
}

/// A run that stopped on a fatal error.
#[derive(Debug, Error)]
#[error("cannot publish SDK: {phase} failed")]
pub struct RunFailure {
    /// The phase that failed.
    pub phase: Phase,
    /// The error that stopped the run.
    #[source]
    pub error: PublisherError,
}

/// What a successful run published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    published: Vec<Coordinate>,
    aggregates: Vec<Coordinate>,
    subsets: Subsets,
}

impl RunSummary {
    /// Return every published coordinate, aggregates included, in order.
    #[must_use]
    pub fn published(&self) -> &[Coordinate] {
        &self.published
    }

    /// Return the aggregate coordinates.
    #[must_use]
    pub fn aggregates(&self) -> &[Coordinate] {
        &self.aggregates
    }

    /// Return the number of members recorded for `kind`.
    #[must_use]
    pub fn subset_size(&self, kind: SubsetKind) -> usize {
        self.subsets.members(kind).len()
    }

    /// Return the accumulated subsets.
    #[must_use]
    pub const fn subsets(&self) -> &Subsets {
        &self.subsets
    }
}

/// The payload and generated-POM scratch files of one run.
///
/// Both paths are deleted when the value is dropped.
struct ScratchFiles {
    payload: TempPath,
    pom: TempPath,
    payload_path: Utf8PathBuf,
    pom_path: Utf8PathBuf,
}

impl ScratchFiles {
    fn create(dir: Option<&Utf8Path>) -> Result<Self> {
        let payload = scratch_file(dir, ".tmp")?;
        let pom = scratch_file(dir, ".pom")?;
        let payload_path = utf8_path(&payload)?;
        let pom_path = utf8_path(&pom)?;
        debug!("scratch files {payload_path} and {pom_path}");
        Ok(Self {
            payload,
            pom,
            payload_path,
            pom_path,
        })
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        debug!(
            "removing scratch files {} and {}",
            self.payload.display(),
            self.pom.display()
        );
    }
}

fn scratch_file(dir: Option<&Utf8Path>, suffix: &str) -> Result<TempPath> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(SCRATCH_PREFIX).suffix(suffix);
    let file = match dir {
        Some(dir) => builder
            .tempfile_in(dir)
            .map_err(|e| PublisherError::io(dir, e))?,
        None => builder
            .tempfile()
            .map_err(|e| PublisherError::io(Utf8Path::new(SCRATCH_PREFIX), e))?,
    };
    Ok(file.into_temp_path())
}

fn utf8_path(path: &TempPath) -> Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path.to_path_buf()).map_err(|e| {
        PublisherError::configuration(format!(
            "scratch path {} is not valid UTF-8",
            e.as_path().display()
        ))
    })
}

/// Runs every phase against one set of publish targets.
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    targets: &'a PublishTargets,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline publishing through `targets`.
    #[must_use]
    pub const fn new(config: &'a PipelineConfig, targets: &'a PublishTargets) -> Self {
        Self { config, targets }
    }

    /// Execute the run.
    ///
    /// # Errors
    ///
    /// Returns a [`RunFailure`] naming the phase that failed. The scratch
    /// files have already been removed when it is returned.
    pub fn run(&self) -> std::result::Result<RunSummary, RunFailure> {
        let scratch = ScratchFiles::create(self.config.scratch_dir.as_deref()).map_err(|error| {
            RunFailure {
                phase: Phase::Init,
                error,
            }
        })?;
        let publisher = Publisher::new(self.targets, &scratch.pom_path);
        let mut ctx = RunContext::new(
            &self.config.layout,
            &self.config.versions,
            publisher,
            &scratch.payload_path,
        );

        let mut aggregates = Vec::new();
        let mut failure = None;
        let mut phase = self.advance(Phase::Init);
        while !phase.is_terminal() {
            info!("starting {phase}");
            let outcome = match phase {
                Phase::ScanLibraries => scan_libraries(&mut ctx),
                Phase::ScanLocales => scan_locales(&mut ctx),
                Phase::ScanConfigs => scan_configs(&mut ctx),
                Phase::ScanThemes => scan_themes(&mut ctx),
                Phase::ScanRsls => scan_rsls(&mut ctx),
                Phase::ScanCompiler => scan_compiler(&mut ctx),
                Phase::BuildAggregators => {
                    build_aggregators(&mut ctx).map(|built| aggregates = built)
                }
                Phase::Init | Phase::Done | Phase::Failed => Ok(()),
            };
            phase = match outcome {
                Ok(()) => self.advance(phase),
                Err(error) => {
                    error!("{phase} failed after {} artifacts", ctx.published().len());
                    failure = Some(RunFailure { phase, error });
                    Phase::Failed
                }
            };
        }
        if let Some(failure) = failure {
            return Err(failure);
        }

        let (published, subsets) = ctx.into_parts();
        info!("published {} artifacts", published.len());
        Ok(RunSummary {
            published,
            aggregates,
            subsets,
        })
    }

    const fn advance(&self, phase: Phase) -> Phase {
        phase.next(self.config.skip_rsls, self.config.skip_compiler)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
