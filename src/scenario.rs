//! Scenario-style regression harness.
//!
//! A scenario stages fixture files into a fresh working directory, runs the
//! tool once with fixed arguments, and asserts the captured output against a
//! multi-line pattern in which every line is an implicitly anchored regular
//! expression. This is how the shipped regressions (for example the
//! tempfile/action-list check) drive the tool.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use regex::Regex;
use tempfile::TempDir;

use crate::error::{BenchError, Result};
use crate::harness::RunOutcome;

#[derive(Debug)]
pub struct Scenario {
    dir: TempDir,
    tool: PathBuf,
    last: Option<RunOutcome>,
}

impl Scenario {
    /// Create a scenario around the given tool executable.
    pub fn new(tool: impl Into<PathBuf>) -> Result<Self> {
        let tool = tool.into();
        if !tool.exists() {
            return Err(BenchError::ToolNotFound {
                name: tool.display().to_string(),
            });
        }
        Ok(Self {
            dir: TempDir::new()?,
            tool,
            last: None,
        })
    }

    /// The scenario's working directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file under the working directory, creating parents.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Copy a fixture file into the working directory under a new name.
    pub fn file_fixture(&self, source: &Path, relative: &str) -> Result<()> {
        let dest = self.dir.path().join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, dest)?;
        Ok(())
    }

    /// Run the tool in the working directory and require success.
    pub fn run(&mut self, args: &[&str]) -> Result<&RunOutcome> {
        let start = Instant::now();
        let output = Command::new(&self.tool)
            .args(args)
            .current_dir(self.dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;
        let elapsed = start.elapsed();

        let outcome = RunOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            success: output.status.success(),
            elapsed,
        };

        if !outcome.success {
            return Err(BenchError::ToolFailure {
                phase: "scenario".to_string(),
                status: outcome
                    .exit_code
                    .map(|c| format!("exit status {}: {}", c, outcome.stderr.trim()))
                    .unwrap_or_else(|| "terminated by signal".to_string()),
            });
        }

        self.last = Some(outcome);
        Ok(self.last.as_ref().expect("outcome just stored"))
    }

    /// Captured stdout of the most recent run.
    pub fn stdout(&self) -> &str {
        self.last.as_ref().map(|o| o.stdout.as_str()).unwrap_or("")
    }

    /// Assert the most recent run's stdout matches the multi-line pattern.
    pub fn expect_stdout(&self, pattern: &str) -> Result<()> {
        if match_lines(self.stdout(), pattern)? {
            return Ok(());
        }
        Err(BenchError::PatternMismatch {
            message: format!(
                "expected:\n{}\nactual:\n{}",
                pattern.trim_end(),
                self.stdout().trim_end()
            ),
        })
    }
}

/// Line-by-line pattern match: the line counts must agree and every pattern
/// line, implicitly anchored at both ends, must match the corresponding
/// output line.
pub fn match_lines(output: &str, pattern: &str) -> Result<bool> {
    let output_lines: Vec<&str> = output.lines().collect();
    let pattern_lines: Vec<&str> = pattern.lines().collect();

    if output_lines.len() != pattern_lines.len() {
        return Ok(false);
    }

    for (out_line, pat_line) in output_lines.iter().zip(&pattern_lines) {
        let anchored = Regex::new(&format!("^(?:{})$", pat_line))?;
        if !anchored.is_match(out_line) {
            return Ok(false);
        }
    }

    Ok(true)
}
