//! Error types and exit codes for buildbench

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for buildbench operations
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Build tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("Build tool failed during {phase}: {status}")]
    ToolFailure { phase: String, status: String },

    #[error("Statistic not found in tool output: {name}")]
    MissingStat { name: String },

    #[error("Unparseable statistic {name}: {message}")]
    StatParse { name: String, message: String },

    #[error("Output did not match expected pattern: {message}")]
    PatternMismatch { message: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid timing configuration: {message}")]
    Config { message: String },

    #[error("Fixture staging failed: {message}")]
    Fixture { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Convert error to appropriate exit code:
    /// - 0: Success
    /// - 1: IO error / fixture staging failure
    /// - 2: Tool missing or tool invocation failed
    /// - 3: Statistics missing or unparseable
    /// - 4: Output pattern mismatch
    /// - 5: Configuration error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ToolNotFound { .. } => ExitCode::from(2),
            Self::ToolFailure { .. } => ExitCode::from(2),
            Self::MissingStat { .. } => ExitCode::from(3),
            Self::StatParse { .. } => ExitCode::from(3),
            Self::PatternMismatch { .. } => ExitCode::from(4),
            Self::Pattern(_) => ExitCode::from(4),
            Self::Config { .. } => ExitCode::from(5),
            Self::Fixture { .. } => ExitCode::from(1),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for buildbench operations
pub type Result<T> = std::result::Result<T, BenchError>;
