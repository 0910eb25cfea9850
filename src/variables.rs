//! Timing-configuration variables.
//!
//! Each variable has a declared default which the process environment may
//! override. Overrides are strings and coerce int-first, then float.
//! Variables whose resolved value is numeric form the default calibrate
//! list; an explicit list from the configuration takes precedence.

use std::env;

use crate::predicates::{is_list, is_map, is_num};
use crate::value::{coerce, Origin, Value};

/// Ordered variable table. Declaration order is preserved because it drives
/// the order of `NAME=value` arguments passed to the tool.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: Vec<(String, Value)>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable with its default. Redeclaring replaces the value
    /// in place, keeping the original position.
    pub fn declare(&mut self, name: &str, default: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = default;
        } else {
            self.entries.push((name.to_string(), default));
        }
    }

    /// Apply an override from the command line.
    pub fn set_override(&mut self, name: &str, raw: &str) {
        self.declare(name, coerce(raw).wrapped(Origin::CommandLine));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Resolve every variable against the process environment and return the
    /// default calibrate list (the names whose resolved value is numeric).
    pub fn resolve_from_env(&mut self) -> Vec<String> {
        self.resolve_with(|name| env::var(name).ok())
    }

    /// Resolution against an arbitrary lookup, for tests.
    pub fn resolve_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut calibratable = Vec::new();

        for (name, value) in &mut self.entries {
            if let Some(raw) = lookup(name) {
                *value = coerce(&raw).wrapped(Origin::Environment);
            } else {
                // Declared defaults may themselves be numeric strings.
                let coerced = match value {
                    Value::Str(s) => Some(coerce(s)),
                    _ => None,
                };
                if let Some(c) = coerced {
                    *value = c;
                }
            }

            if is_num(value) {
                calibratable.push(name.clone());
            }
        }

        calibratable
    }

    /// Render the table as `NAME=value` command-line arguments.
    pub fn as_options(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect()
    }

    /// Names whose values cannot be rendered as a single option argument.
    pub fn non_scalar_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, v)| is_list(v) || is_map(v))
            .map(|(n, _)| n.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    fn table() -> Variables {
        let mut vars = Variables::new();
        vars.declare("TARGET_COUNT", Value::Int(50));
        vars.declare("DEPTH", Value::Str("3".to_string()));
        vars.declare("MODE", Value::Str("debug".to_string()));
        vars
    }

    #[test]
    fn test_numeric_defaults_are_calibratable() {
        let mut vars = table();
        let calibrate = vars.resolve_with(|_| None);
        assert_eq!(calibrate, vec!["TARGET_COUNT", "DEPTH"]);
    }

    #[test]
    fn test_string_defaults_coerce_to_numbers() {
        let mut vars = table();
        vars.resolve_with(|_| None);
        assert_eq!(vars.get("DEPTH"), Some(&Value::Int(3)));
        assert_eq!(vars.get("MODE").map(|v| v.kind()), Some(Kind::Str));
    }

    #[test]
    fn test_environment_overrides_win() {
        let mut vars = table();
        let calibrate = vars.resolve_with(|name| {
            (name == "TARGET_COUNT").then(|| "500".to_string())
        });

        let value = vars.get("TARGET_COUNT").unwrap();
        assert_eq!(value.kind(), Kind::Int);
        assert_eq!(value.origin(), Some(Origin::Environment));
        assert_eq!(value.to_string(), "500");
        assert!(calibrate.contains(&"TARGET_COUNT".to_string()));
    }

    #[test]
    fn test_non_numeric_override_is_not_calibratable() {
        let mut vars = table();
        let calibrate =
            vars.resolve_with(|name| (name == "TARGET_COUNT").then(|| "many".to_string()));
        assert_eq!(calibrate, vec!["DEPTH"]);
    }

    #[test]
    fn test_as_options_preserves_declaration_order() {
        let mut vars = table();
        vars.resolve_with(|_| None);
        assert_eq!(
            vars.as_options(),
            vec!["TARGET_COUNT=50", "DEPTH=3", "MODE=debug"]
        );
    }

    #[test]
    fn test_command_line_override() {
        let mut vars = table();
        vars.set_override("MODE", "release");
        let value = vars.get("MODE").unwrap();
        assert_eq!(value.origin(), Some(Origin::CommandLine));
        assert_eq!(value.to_string(), "release");
    }

    #[test]
    fn test_non_scalar_names() {
        let mut vars = Variables::new();
        vars.declare("FLAGS", Value::List(vec![Value::Int(1)]));
        vars.declare("N", Value::Int(2));
        assert_eq!(vars.non_scalar_names(), vec!["FLAGS"]);
    }
}
