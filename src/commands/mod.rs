//! Command modules for the buildbench CLI
//!
//! Each module implements a single top-level command:
//! - `time` - the standard startup/full/null timing sequence
//! - `calibrate` - a single calibration build
//! - `stats` - statistic extraction from a captured transcript
//!
//! All command handlers take their respective `Args` struct from `cli.rs`
//! and a shared `CommandContext` for output format and verbosity.

pub mod calibrate;
pub mod stats;
pub mod time;

pub use calibrate::run_calibrate;
pub use stats::run_stats;
pub use time::run_time;

use crate::cli::OutputFormat;

/// Shared context passed to all command handlers
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Output format (text or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
}

impl Default for CommandContext {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            verbose: false,
        }
    }
}

impl CommandContext {
    /// Create a new CommandContext from CLI args
    pub fn from_cli(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }
}
