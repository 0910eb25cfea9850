//! Calibrate command handler - a single calibration build

use crate::cli::TimeArgs;
use crate::commands::CommandContext;
use crate::error::Result;

/// Run the calibrate command: the same setup as `time`, but a single full
/// build reporting only `VARIABLE:` and `ELAPSED:` lines.
pub fn run_calibrate(args: &TimeArgs, ctx: &CommandContext) -> Result<String> {
    super::time::execute(args, ctx, true)
}
