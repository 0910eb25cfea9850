//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Timing harness for external build tools
#[derive(Parser, Debug)]
#[command(name = "buildbench")]
#[command(about = "Times external build tools and reports TRACE statistics")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands for buildbench
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the standard timing sequence: startup probe, full build, null build
    #[command(visible_alias = "t")]
    Time(TimeArgs),

    /// Run a single calibration build, reporting variables and elapsed time
    Calibrate(TimeArgs),

    /// Extract statistics from a captured tool transcript
    Stats(StatsArgs),
}

/// Arguments shared by the time and calibrate commands
#[derive(Args, Debug)]
pub struct TimeArgs {
    /// Fixture directory containing buildbench.toml (defaults to the
    /// current directory)
    #[arg(value_name = "DIR")]
    pub fixture: Option<PathBuf>,

    /// Override the tool executable named in the configuration
    #[arg(long, value_name = "TOOL")]
    pub tool: Option<String>,

    /// Set or override a configuration variable (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Run in the fixture directory itself instead of a temporary copy
    #[arg(long)]
    pub in_place: bool,

    /// Suppress echoing of the tool's own output
    #[arg(long)]
    pub quiet: bool,
}

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Transcript file to parse (stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}
