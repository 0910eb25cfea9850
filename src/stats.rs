//! Statistic descriptors and extraction from captured tool output.
//!
//! The regex table below is the contract with the build tool's
//! `--debug=memory,time` output. Memory figures are reported by the tool in
//! bytes and converted to kbytes here; time figures are fractional seconds.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{BenchError, Result};

/// How a captured string becomes a reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convert {
    /// Parse as a byte count, report kbytes.
    BytesToKbytes,
    /// Parse as fractional seconds.
    Seconds,
}

/// A single named statistic scraped out of the tool's output.
pub struct Stat {
    pub name: &'static str,
    pub units: &'static str,
    pub expression: Regex,
    pub convert: Convert,
}

impl Stat {
    fn new(name: &'static str, units: &'static str, expression: &str, convert: Convert) -> Self {
        Self {
            name,
            units,
            expression: Regex::new(expression).expect("valid stat pattern"),
            convert,
        }
    }
}

/// The fixed statistic table, constructed once at load time.
pub static STAT_LIST: Lazy<Vec<Stat>> = Lazy::new(|| {
    vec![
        Stat::new(
            "memory-initial",
            "kbytes",
            r"Memory before reading configuration files:\s+(\d+)",
            Convert::BytesToKbytes,
        ),
        Stat::new(
            "memory-prebuild",
            "kbytes",
            r"Memory before building targets:\s+(\d+)",
            Convert::BytesToKbytes,
        ),
        Stat::new(
            "memory-final",
            "kbytes",
            r"Memory after building targets:\s+(\d+)",
            Convert::BytesToKbytes,
        ),
        Stat::new(
            "time-config",
            "seconds",
            r"Total configuration file execution time:\s+([\d.]+) seconds",
            Convert::Seconds,
        ),
        Stat::new(
            "time-engine",
            "seconds",
            r"Total build engine execution time:\s+([\d.]+) seconds",
            Convert::Seconds,
        ),
        Stat::new(
            "time-commands",
            "seconds",
            r"Total command execution time:\s+([\d.]+) seconds",
            Convert::Seconds,
        ),
        Stat::new(
            "time-total",
            "seconds",
            r"Total build time:\s+([\d.]+) seconds",
            Convert::Seconds,
        ),
    ]
});

/// An extracted numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Seconds(f64),
}

impl StatValue {
    pub fn is_zero(&self) -> bool {
        match self {
            StatValue::Count(n) => *n == 0,
            StatValue::Seconds(s) => *s == 0.0,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Seconds(s) => write!(f, "{}", s),
        }
    }
}

/// One named measurement with its unit label.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub name: &'static str,
    pub value: StatValue,
    pub units: &'static str,
}

/// Measurements in [`STAT_LIST`] order.
#[derive(Debug, Clone, Default)]
pub struct StatSet {
    entries: Vec<Measurement>,
}

impl StatSet {
    pub fn get(&self, name: &str) -> Option<&Measurement> {
        self.entries.iter().find(|m| m.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Measurement> {
        let idx = self.entries.iter().position(|m| m.name == name)?;
        Some(self.entries.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Apply every [`STAT_LIST`] pattern to the captured output. Stats whose
/// pattern does not match are absent from the result; a matched value that
/// fails to parse is an error.
pub fn collect_stats(input: &str) -> Result<StatSet> {
    let mut entries = Vec::new();

    for stat in STAT_LIST.iter() {
        let captures = match stat.expression.captures(input) {
            Some(c) => c,
            None => continue,
        };
        let raw = captures.get(1).map(|m| m.as_str()).unwrap_or_default();

        let value = match stat.convert {
            Convert::BytesToKbytes => {
                let bytes: u64 = raw.parse().map_err(|e| BenchError::StatParse {
                    name: stat.name.to_string(),
                    message: format!("{:?}: {}", raw, e),
                })?;
                StatValue::Count(bytes / 1024)
            }
            Convert::Seconds => {
                let seconds: f64 = raw.parse().map_err(|e| BenchError::StatParse {
                    name: stat.name.to_string(),
                    message: format!("{:?}: {}", raw, e),
                })?;
                StatValue::Seconds(seconds)
            }
        };

        entries.push(Measurement {
            name: stat.name,
            value,
            units: stat.units,
        });
    }

    Ok(StatSet { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "\
scons: Reading configuration files ...
Memory before reading configuration files: 2097152
scons: done reading configuration files.
Memory before building targets: 3145728
scons: Building targets ...
Memory after building targets: 4194304
Total build time: 12.5 seconds
Total configuration file execution time: 1.25 seconds
Total build engine execution time: 11.0 seconds
Total command execution time: 9.75 seconds
";

    #[test]
    fn test_collect_stats_extracts_literal_values() {
        let stats = collect_stats(TRANSCRIPT).unwrap();

        assert_eq!(stats.len(), 7);
        assert_eq!(
            stats.get("time-total").unwrap().value,
            StatValue::Seconds(12.5)
        );
        assert_eq!(
            stats.get("time-config").unwrap().value,
            StatValue::Seconds(1.25)
        );
        assert_eq!(
            stats.get("time-commands").unwrap().value,
            StatValue::Seconds(9.75)
        );
    }

    #[test]
    fn test_memory_values_reported_in_kbytes() {
        let stats = collect_stats(TRANSCRIPT).unwrap();

        assert_eq!(
            stats.get("memory-initial").unwrap().value,
            StatValue::Count(2048)
        );
        assert_eq!(
            stats.get("memory-prebuild").unwrap().value,
            StatValue::Count(3072)
        );
        assert_eq!(
            stats.get("memory-final").unwrap().value,
            StatValue::Count(4096)
        );
        assert_eq!(stats.get("memory-final").unwrap().units, "kbytes");
    }

    #[test]
    fn test_missing_markers_are_absent() {
        let stats = collect_stats("no markers here\n").unwrap();
        assert!(stats.is_empty());
        assert!(stats.get("time-total").is_none());
    }

    #[test]
    fn test_stat_set_preserves_table_order() {
        let stats = collect_stats(TRANSCRIPT).unwrap();
        let names: Vec<&str> = stats.iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec![
                "memory-initial",
                "memory-prebuild",
                "memory-final",
                "time-config",
                "time-engine",
                "time-commands",
                "time-total",
            ]
        );
    }

    #[test]
    fn test_remove_returns_the_measurement() {
        let mut stats = collect_stats(TRANSCRIPT).unwrap();
        let removed = stats.remove("time-commands").unwrap();
        assert_eq!(removed.value, StatValue::Seconds(9.75));
        assert!(stats.get("time-commands").is_none());
        assert_eq!(stats.len(), 6);
    }
}
