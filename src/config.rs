//! Timing-configuration manifest.
//!
//! A fixture directory carries a `buildbench.toml` describing how to invoke
//! the tool under measurement:
//!
//! ```toml
//! tool = "scons"
//! arguments = ["-j", "1"]
//! targets = ["."]
//! up_to_date_pattern = '(?m)^scons: `\.` is up to date\.$'
//!
//! [variables]
//! TARGET_COUNT = 500
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BenchError, Result};
use crate::value::Value;
use crate::variables::Variables;

/// Name of the manifest file inside a fixture directory.
pub const CONFIG_FILE_NAME: &str = "buildbench.toml";

/// Default name prefix for harness output artifacts; files and directories
/// carrying it are never copied into the working directory.
pub const DEFAULT_ARTIFACT_PREFIX: &str = "buildbench-";

/// Parsed `buildbench.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Executable name (resolved on PATH) or path of the tool to measure.
    pub tool: String,

    /// Arguments passed to every invocation, before variables and targets.
    #[serde(default)]
    pub arguments: Vec<String>,

    /// Build targets for the full and null phases.
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,

    /// When set, the null build's output must match this pattern.
    #[serde(default)]
    pub up_to_date_pattern: Option<String>,

    /// Name prefix identifying harness output artifacts.
    #[serde(default = "default_artifact_prefix")]
    pub artifact_prefix: String,

    /// Variable defaults, overridable from the environment.
    #[serde(default)]
    pub variables: BTreeMap<String, toml::Value>,

    /// Explicit calibrate list; when empty, every numeric variable is used.
    #[serde(default)]
    pub calibrate_variables: Vec<String>,
}

fn default_targets() -> Vec<String> {
    vec![".".to_string()]
}

fn default_artifact_prefix() -> String {
    DEFAULT_ARTIFACT_PREFIX.to_string()
}

impl TimingConfig {
    /// Load the manifest from a fixture directory.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Err(BenchError::Config {
                message: format!("{} not found in {}", CONFIG_FILE_NAME, dir.display()),
            });
        }
        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: TimingConfig = toml::from_str(content).map_err(|e| BenchError::Config {
            message: e.to_string(),
        })?;
        if config.tool.is_empty() {
            return Err(BenchError::Config {
                message: "tool must not be empty".to_string(),
            });
        }
        Ok(config)
    }

    /// Build the variable table from the manifest's `[variables]` section.
    pub fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        for (name, value) in &self.variables {
            vars.declare(name, from_toml(value));
        }
        vars
    }
}

fn from_toml(value: &toml::Value) -> Value {
    match value {
        toml::Value::Integer(i) => Value::Int(*i),
        toml::Value::Float(f) => Value::Float(*f),
        toml::Value::String(s) => Value::Str(s.clone()),
        toml::Value::Boolean(b) => Value::Str(b.to_string()),
        toml::Value::Datetime(d) => Value::Str(d.to_string()),
        toml::Value::Array(items) => Value::List(items.iter().map(from_toml).collect()),
        toml::Value::Table(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), from_toml(v)))
                .collect(),
        ),
    }
}
