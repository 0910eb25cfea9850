//! Time command handler - the standard timing sequence

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::cli::TimeArgs;
use crate::commands::CommandContext;
use crate::config::TimingConfig;
use crate::error::{BenchError, Result};
use crate::fixture::copy_timing_configuration;
use crate::harness::{TimingHarness, CALIBRATE_ENV};
use crate::trace::TraceSink;
use crate::variables::Variables;

/// Run the time command. `BUILDBENCH_CALIBRATE` switches the whole run to
/// calibration mode, mirroring the explicit `calibrate` subcommand.
pub fn run_time(args: &TimeArgs, ctx: &CommandContext) -> Result<String> {
    let calibrate = env::var(CALIBRATE_ENV).map(|v| v != "0").unwrap_or(false);
    execute(args, ctx, calibrate)
}

/// Shared implementation for `time` and `calibrate`. Traces stream straight
/// to stdout, so the handler itself has no output to return.
pub(crate) fn execute(args: &TimeArgs, ctx: &CommandContext, calibrate: bool) -> Result<String> {
    let fixture_dir = match &args.fixture {
        Some(dir) => dir.clone(),
        None => env::current_dir()?,
    };

    let mut config = TimingConfig::load_dir(&fixture_dir)?;
    if let Some(tool) = &args.tool {
        config.tool = tool.clone();
    }

    let mut variables = config.variables();
    apply_overrides(&mut variables, &args.vars)?;

    // Stage the fixture into a scratch directory unless asked to run in
    // place; the TempDir must outlive the harness run.
    let staged: Option<TempDir>;
    let workdir: PathBuf = if args.in_place {
        staged = None;
        fixture_dir.clone()
    } else {
        let dir = TempDir::new()?;
        let copied =
            copy_timing_configuration(&fixture_dir, dir.path(), &config.artifact_prefix)?;
        if ctx.verbose {
            tracing::info!(
                copied,
                from = %fixture_dir.display(),
                to = %dir.path().display(),
                "staged timing configuration"
            );
        }
        let path = dir.path().to_path_buf();
        staged = Some(dir);
        path
    };

    let mut harness =
        TimingHarness::with_variables(&config, variables, &workdir, TraceSink::Stdout)?;
    harness.set_calibrate(calibrate);
    if args.quiet {
        harness.set_echo(false);
    }

    let result = harness.execute();
    drop(staged);
    result?;

    Ok(String::new())
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(BenchError::Config {
            message: format!("expected NAME=VALUE, got {:?}", assignment),
        }),
    }
}

fn apply_overrides(variables: &mut Variables, assignments: &[String]) -> Result<()> {
    for assignment in assignments {
        let (name, value) = parse_assignment(assignment)?;
        variables.set_override(name, value);
    }
    Ok(())
}
