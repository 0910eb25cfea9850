//! The timing harness.
//!
//! Runs the build tool three times (a `--help` startup probe, a full build,
//! and a null rebuild), timing each invocation and scraping the tool's
//! `--debug=memory,time` output into TRACE lines. In calibration mode a
//! single full build runs instead, reporting only the calibrate variables
//! and the elapsed time.
//!
//! Execution is synchronous throughout: each invocation blocks until the
//! tool exits, and elapsed time is taken from timestamps immediately before
//! and after the blocking wait.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use regex::Regex;

use crate::config::TimingConfig;
use crate::error::{BenchError, Result};
use crate::loadavg;
use crate::stats::{collect_stats, StatSet};
use crate::trace::{TraceLine, TraceSink};
use crate::variables::Variables;

/// Environment variable selecting calibration mode (any value but "0").
pub const CALIBRATE_ENV: &str = "BUILDBENCH_CALIBRATE";

/// Option that makes the tool report its memory and time statistics.
const TIMING_FLAG: &str = "--debug=memory,time";

/// Captured result of one tool invocation.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub success: bool,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct TimingHarness {
    tool: PathBuf,
    base_args: Vec<String>,
    targets: Vec<String>,
    workdir: PathBuf,
    variables: Variables,
    calibrate_variables: Vec<String>,
    calibrate: bool,
    echo: bool,
    up_to_date: Option<Regex>,
    sink: TraceSink,
    last_elapsed: Option<Duration>,
}

impl TimingHarness {
    /// Build a harness from a parsed manifest. Resolves the tool executable,
    /// applies environment overrides to the variable table, and derives the
    /// calibrate list when the manifest does not name one.
    pub fn new(config: &TimingConfig, workdir: &Path, sink: TraceSink) -> Result<Self> {
        Self::with_variables(config, config.variables(), workdir, sink)
    }

    /// Like [`TimingHarness::new`], with a pre-populated variable table
    /// (command-line overrides already applied).
    pub fn with_variables(
        config: &TimingConfig,
        mut variables: Variables,
        workdir: &Path,
        sink: TraceSink,
    ) -> Result<Self> {
        let tool = resolve_tool(&config.tool)?;
        let default_calibrate = variables.resolve_from_env();

        let non_scalar = variables.non_scalar_names();
        if !non_scalar.is_empty() {
            return Err(BenchError::Config {
                message: format!(
                    "variables must be scalar to pass on the command line: {}",
                    non_scalar.join(", ")
                ),
            });
        }

        let calibrate_variables = if config.calibrate_variables.is_empty() {
            default_calibrate
        } else {
            config.calibrate_variables.clone()
        };

        let up_to_date = match &config.up_to_date_pattern {
            Some(pattern) => Some(Regex::new(pattern)?),
            None => None,
        };

        Ok(Self {
            tool,
            base_args: config.arguments.clone(),
            targets: config.targets.clone(),
            workdir: workdir.to_path_buf(),
            variables,
            calibrate_variables,
            calibrate: calibrate_from_env(),
            echo: true,
            up_to_date,
            sink,
            last_elapsed: None,
        })
    }

    pub fn set_calibrate(&mut self, on: bool) {
        self.calibrate = on;
    }

    /// Echo the tool's captured stdout to our own (on by default, so the
    /// raw statistics lines appear alongside the TRACE lines).
    pub fn set_echo(&mut self, on: bool) {
        self.echo = on;
    }

    pub fn calibrate_variables(&self) -> &[String] {
        &self.calibrate_variables
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn sink(&self) -> &TraceSink {
        &self.sink
    }

    pub fn into_sink(self) -> TraceSink {
        self.sink
    }

    /// Elapsed wall-clock time of the most recent invocation, in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.last_elapsed.unwrap_or_default().as_secs_f64()
    }

    /// The standard sequence: load averages, startup probe, full build,
    /// null build, or a single calibration run when calibration mode is on.
    pub fn execute(&mut self) -> Result<()> {
        if self.calibrate {
            self.calibration()
        } else {
            loadavg::report(&mut self.sink)?;
            self.startup()?;
            self.full()?;
            self.null()
        }
    }

    /// Run the tool with `--help` to isolate startup cost: the tool exits
    /// after reading its configuration, before any real work. A failed help
    /// run is tolerated; it only costs us that run's statistics.
    pub fn startup(&mut self) -> Result<()> {
        let args = self.timing_args(&["--help"], false);
        let outcome = self.run_tool("startup", &args, false)?;
        self.echo_stdout(&outcome);

        let mut stats = collect_stats(&outcome.stdout)?;
        // No commands ever run under --help; the 0.0 entry is noise.
        stats.remove("time-commands");
        self.report_traces("startup", &stats)
    }

    /// Run a full build of all targets.
    pub fn full(&mut self) -> Result<()> {
        let args = self.timing_args(&[], true);
        let outcome = self.run_tool("full", &args, true)?;
        self.echo_stdout(&outcome);

        let stats = collect_stats(&outcome.stdout)?;
        self.report_traces("full", &stats)?;
        self.report_memory_graph("full-memory", &stats)
    }

    /// Run an up-to-date rebuild of the same targets.
    pub fn null(&mut self) -> Result<()> {
        let args = self.timing_args(&[], true);
        let outcome = self.run_tool("null", &args, true)?;
        self.echo_stdout(&outcome);

        if let Some(pattern) = &self.up_to_date {
            if !pattern.is_match(&outcome.stdout) {
                return Err(BenchError::PatternMismatch {
                    message: "null build did not report targets up to date".to_string(),
                });
            }
        }

        let mut stats = collect_stats(&outcome.stdout)?;
        let commands = stats
            .get("time-commands")
            .ok_or_else(|| BenchError::MissingStat {
                name: "time-commands".to_string(),
            })?;
        // Drop the entry only when it is actually 0.0: a supposedly-null
        // build that still runs commands should show up in the traces.
        if commands.value.is_zero() {
            stats.remove("time-commands");
        }

        self.report_traces("null", &stats)?;
        self.report_memory_graph("null-memory", &stats)
    }

    /// Run a full build reporting only the calibrate variables and the
    /// elapsed time, for establishing baseline comparison points.
    pub fn calibration(&mut self) -> Result<()> {
        let args = self.timing_args(&[], true);
        self.run_tool("calibration", &args, true)?;

        let mut out = io::stdout().lock();
        for name in &self.calibrate_variables {
            if let Some(value) = self.variables.get(name) {
                writeln!(out, "VARIABLE: {}={}", name, value)?;
            }
        }
        writeln!(out, "ELAPSED: {}", self.elapsed_seconds())?;
        out.flush()?;
        Ok(())
    }

    /// Spawn the tool and block until it exits, timestamping immediately
    /// before and after the wait. The elapsed time is recorded even when
    /// the invocation fails.
    fn run_tool(&mut self, phase: &str, args: &[String], check_status: bool) -> Result<RunOutcome> {
        tracing::debug!(tool = %self.tool.display(), phase, ?args, "invoking build tool");

        let start = Instant::now();
        let result = Command::new(&self.tool)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();
        let elapsed = start.elapsed();
        self.last_elapsed = Some(elapsed);

        let output = result?;
        let outcome = RunOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            success: output.status.success(),
            elapsed,
        };

        if check_status && !outcome.success {
            tracing::warn!(phase, stderr = %outcome.stderr, "build tool failed");
            return Err(BenchError::ToolFailure {
                phase: phase.to_string(),
                status: outcome
                    .exit_code
                    .map(|c| format!("exit status {}", c))
                    .unwrap_or_else(|| "terminated by signal".to_string()),
            });
        }

        Ok(outcome)
    }

    /// Assemble the argument list: base arguments, `NAME=value` variables,
    /// phase-specific flags, the timing flag, then targets.
    fn timing_args(&self, extra_flags: &[&str], with_targets: bool) -> Vec<String> {
        let mut args = self.base_args.clone();
        args.extend(self.variables.as_options());
        args.extend(extra_flags.iter().map(|s| s.to_string()));
        args.push(TIMING_FLAG.to_string());
        if with_targets {
            args.extend(self.targets.iter().cloned());
        }
        args
    }

    /// Emit the elapsed-time trace for the phase, then one trace per stat.
    fn report_traces(&mut self, phase: &str, stats: &StatSet) -> Result<()> {
        self.sink.emit(TraceLine::with_sort(
            "harness-elapsed",
            phase,
            self.elapsed_seconds().to_string(),
            "seconds",
            0,
        ))?;
        for m in stats.iter() {
            self.sink
                .emit(TraceLine::new(m.name, phase, m.value.to_string(), m.units))?;
        }
        Ok(())
    }

    /// Emit the initial/prebuild/final memory figures on a dedicated graph.
    fn report_memory_graph(&mut self, graph: &str, stats: &StatSet) -> Result<()> {
        for (name, stat_name) in [
            ("initial", "memory-initial"),
            ("prebuild", "memory-prebuild"),
            ("final", "memory-final"),
        ] {
            let m = stats
                .get(stat_name)
                .ok_or_else(|| BenchError::MissingStat {
                    name: stat_name.to_string(),
                })?;
            self.sink
                .emit(TraceLine::new(graph, name, m.value.to_string(), m.units))?;
        }
        Ok(())
    }

    fn echo_stdout(&self, outcome: &RunOutcome) {
        if self.echo {
            print!("{}", outcome.stdout);
            let _ = io::stdout().flush();
        }
    }
}

/// Resolve the tool: names containing a path separator are used as paths,
/// bare names are looked up on PATH.
fn resolve_tool(name: &str) -> Result<PathBuf> {
    let not_found = || BenchError::ToolNotFound {
        name: name.to_string(),
    };

    if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
        let path = PathBuf::from(name);
        if path.exists() {
            return Ok(path);
        }
        return Err(not_found());
    }

    which::which(name).map_err(|_| not_found())
}

fn calibrate_from_env() -> bool {
    std::env::var(CALIBRATE_ENV)
        .map(|v| v != "0")
        .unwrap_or(false)
}
