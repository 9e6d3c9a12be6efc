//! Publish-flow helpers for the publisher binary.
//!
//! This module turns the parsed command line and the settings file into the
//! stores a run publishes through, keeping that wiring out of `main.rs`.

use camino::Utf8Path;
use flex_sdk_publisher::cli::{Cli, Command};
use flex_sdk_publisher::error::Result;
use flex_sdk_publisher::publisher::PublishTargets;
use flex_sdk_publisher::repository::{ArtifactStore, DryRunStore, LocalRepository, remote_store};
use flex_sdk_publisher::settings::Settings;
use log::debug;

/// Build the stores for the selected subcommand.
///
/// Dry runs still validate the deployment URL but replace every store with
/// one that only logs.
pub(crate) fn publish_targets(
    cli: &Cli,
    settings: &Settings,
    local_root: &Utf8Path,
) -> Result<PublishTargets> {
    let dry_run = cli.install_args().dry_run;
    let local: Box<dyn ArtifactStore> = if dry_run {
        Box::new(DryRunStore::new(local_root.as_str()))
    } else {
        Box::new(LocalRepository::new(local_root.to_owned()))
    };

    let Command::Deploy(deploy) = &cli.command else {
        return Ok(PublishTargets::install(local));
    };
    let credentials = settings.server(&deploy.repository_id);
    if credentials.is_none() {
        debug!(
            "no credentials for {}; deploying anonymously",
            deploy.repository_id
        );
    }
    let remote = remote_store(&deploy.url, credentials)?;
    let remote: Box<dyn ArtifactStore> = if dry_run {
        Box::new(DryRunStore::new(deploy.url.as_str()))
    } else {
        remote
    };
    Ok(PublishTargets::deploy(local, remote))
}
