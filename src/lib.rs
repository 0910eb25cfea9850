//! buildbench: timing, benchmarking, and regression harness for external
//! build tools.
//!
//! The harness runs a build tool three times (a `--help` startup probe, a
//! full build, and a null rebuild), scraping the tool's `--debug=memory,time`
//! output with a fixed regex table and emitting one `TRACE:` line per
//! measurement for a downstream graphing consumer. Calibration mode runs a
//! single build and reports only the configuration variables and elapsed
//! time.
//!
//! # Example
//!
//! ```ignore
//! use buildbench::{TimingConfig, TimingHarness, TraceSink};
//! use std::path::Path;
//!
//! let fixture = Path::new("fixtures/small");
//! let config = TimingConfig::load_dir(fixture)?;
//! let mut harness = TimingHarness::new(&config, fixture, TraceSink::Stdout)?;
//! harness.execute()?;
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fixture;
pub mod harness;
pub mod loadavg;
pub mod predicates;
pub mod scenario;
pub mod stats;
pub mod trace;
pub mod value;
pub mod variables;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use config::{TimingConfig, CONFIG_FILE_NAME, DEFAULT_ARTIFACT_PREFIX};
pub use error::{BenchError, Result};
pub use fixture::copy_timing_configuration;
pub use harness::{RunOutcome, TimingHarness, CALIBRATE_ENV};
pub use scenario::{match_lines, Scenario};
pub use stats::{collect_stats, Measurement, Stat, StatSet, StatValue, STAT_LIST};
pub use trace::{TraceLine, TraceSink};
pub use value::{Kind, Origin, Value};
pub use variables::Variables;
