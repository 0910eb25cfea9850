//! Trace-line output for the downstream graphing consumer.
//!
//! One measurement per line, flushed immediately:
//!
//! ```text
//! TRACE: graph=<g> name=<n> value=<v> units=<u>[ sort=<s>]
//! ```

use std::fmt;
use std::io::{self, Write};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A single reported measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceLine {
    pub graph: String,
    pub name: String,
    pub value: String,
    pub units: String,
    pub sort: Option<u32>,
}

static TRACE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^TRACE: graph=(\S+) name=(\S+) value=(\S+) units=(\S+)(?: sort=(\d+))?$")
        .expect("valid trace pattern")
});

impl TraceLine {
    pub fn new(
        graph: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        units: impl Into<String>,
    ) -> Self {
        Self {
            graph: graph.into(),
            name: name.into(),
            value: value.into(),
            units: units.into(),
            sort: None,
        }
    }

    pub fn with_sort(
        graph: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        units: impl Into<String>,
        sort: u32,
    ) -> Self {
        Self {
            sort: Some(sort),
            ..Self::new(graph, name, value, units)
        }
    }

    /// Parse a single trace line. Used to verify emitted output.
    pub fn parse(line: &str) -> Option<Self> {
        let captures = TRACE_PATTERN.captures(line.trim_end())?;
        Some(Self {
            graph: captures[1].to_string(),
            name: captures[2].to_string(),
            value: captures[3].to_string(),
            units: captures[4].to_string(),
            sort: captures.get(5).and_then(|m| m.as_str().parse().ok()),
        })
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRACE: graph={} name={} value={} units={}",
            self.graph, self.name, self.value, self.units
        )?;
        if let Some(sort) = self.sort {
            write!(f, " sort={}", sort)?;
        }
        Ok(())
    }
}

/// Destination for trace lines: the real stdout stream, or an in-memory
/// buffer for tests.
#[derive(Debug)]
pub enum TraceSink {
    Stdout,
    Capture(Vec<TraceLine>),
}

impl TraceSink {
    pub fn capture() -> Self {
        TraceSink::Capture(Vec::new())
    }

    /// Emit one line. Stdout is flushed per line so traces interleave
    /// correctly with the echoed tool output.
    pub fn emit(&mut self, line: TraceLine) -> io::Result<()> {
        match self {
            TraceSink::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}", line)?;
                out.flush()
            }
            TraceSink::Capture(lines) => {
                lines.push(line);
                Ok(())
            }
        }
    }

    /// Lines captured so far; empty for the stdout sink.
    pub fn captured(&self) -> &[TraceLine] {
        match self {
            TraceSink::Stdout => &[],
            TraceSink::Capture(lines) => lines,
        }
    }
}
