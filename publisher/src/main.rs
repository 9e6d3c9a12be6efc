//! Flex SDK publisher CLI entrypoint.
//!
//! This binary scans an unpacked Flex SDK, publishes every artifact with a
//! generated POM into the local Maven repository and, for `deploy`, into a
//! remote repository as well. It prints the run plan before publishing and a
//! summary of the aggregate POMs afterwards.

mod publish_flow;

use clap::Parser;
use flex_sdk_publisher::cli::{Cli, Command, InstallArgs};
use flex_sdk_publisher::descriptor::resolve_versions;
use flex_sdk_publisher::error::PublisherError;
use flex_sdk_publisher::output::{
    RunPlan, error_report, success_message, summary_text, write_stderr_line,
};
use flex_sdk_publisher::pipeline::{Pipeline, RunFailure};
use flex_sdk_publisher::settings::Settings;
use std::io::Write;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Failures that end the process with a non-zero exit code.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration or version resolution failed before the run started.
    #[error(transparent)]
    Setup(#[from] PublisherError),
    /// The pipeline stopped in one of its phases.
    #[error(transparent)]
    Run(#[from] RunFailure),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.install_args());
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Installs a stderr formatter; `RUST_LOG` overrides the `-v`/`-q` level.
fn init_logging(args: &InstallArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str()));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        // A subscriber is already installed; keep it.
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<(), CliError> {
    let args = cli.install_args();
    let settings = Settings::load(args.settings.as_deref())?;
    let local_root = settings.local_repository(args.local_repository.as_deref())?;
    let layout = args.layout();
    let versions = resolve_versions(&layout, args.sdk_version.clone(), args.air_version.clone())?;
    let targets = publish_flow::publish_targets(cli, &settings, &local_root)?;

    let remote = match &cli.command {
        Command::Install(_) => None,
        Command::Deploy(deploy) => Some(deploy.url.as_str()),
    };
    if !args.quiet {
        let plan = RunPlan {
            layout: &layout,
            versions: &versions,
            local_repository: &local_root,
            remote,
            skip_rsls: args.skip_rsls,
            skip_compiler: args.skip_compiler,
            dry_run: args.dry_run,
        };
        write_stderr_line(stderr, plan.display_text());
        write_stderr_line(stderr, "");
    }

    let config = args.pipeline_config(versions);
    let summary = Pipeline::new(&config, &targets).run()?;

    if !args.quiet {
        let destination = remote.unwrap_or(local_root.as_str());
        write_stderr_line(stderr, "");
        let count = summary.published().len();
        write_stderr_line(stderr, success_message(count, destination));
        write_stderr_line(stderr, summary_text(&summary));
    }
    Ok(())
}

fn exit_code_for_run_result(result: Result<(), CliError>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, error_report(&err));
            1
        }
    }
}
