//! Flex SDK publisher library.
//!
//! This crate converts an unpacked Flex SDK release tree into Maven artifacts
//! and publishes them, with generated POMs, into a local repository and
//! optionally a remote deployment repository. It is used by the
//! `flex-sdk-publisher` CLI binary and can be driven programmatically for
//! testing or custom publishing workflows.
//!
//! # Modules
//!
//! - [`aggregator`] - Aggregate POM synthesis for the tracked subsets
//! - [`archive`] - Zip archive builder with include/exclude globs
//! - [`cli`] - Command-line argument definitions
//! - [`coordinate`] - Artifact coordinates, kinds and classifiers
//! - [`descriptor`] - SDK and AIR version descriptor readers
//! - [`error`] - Semantic error types
//! - [`output`] - Progress and summary output helpers
//! - [`pipeline`] - Phase-ordered pipeline driver
//! - [`pom`] - POM manifest generation
//! - [`publisher`] - Two-phase (POM, payload) publishing
//! - [`repository`] - Local, file and HTTP artifact stores
//! - [`rules`] - Classification lookup tables
//! - [`scan`] - Per-subtree directory classifiers
//! - [`sdk`] - Flex SDK directory layout
//! - [`settings`] - Settings file with repository credentials
//! - [`subsets`] - Subset accumulators for aggregate POMs
//! - [`version`] - SDK/AIR version selection

pub mod aggregator;
pub mod archive;
pub mod cli;
pub mod coordinate;
pub mod descriptor;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod pom;
pub mod publisher;
pub mod repository;
pub mod rules;
pub mod scan;
pub mod sdk;
pub mod settings;
pub mod subsets;
pub mod version;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
