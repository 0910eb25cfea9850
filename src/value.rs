//! Dynamic values for timing-configuration variables.
//!
//! Variable defaults come from the fixture's `buildbench.toml`; overrides
//! arrive as strings from the environment or the command line and are kept in
//! a [`Wrapped`] value that records where they came from. A wrapped value
//! classifies as its underlying shape everywhere in the crate.

use std::collections::BTreeMap;
use std::fmt;

/// A configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Wrapped(Box<Wrapped>),
}

/// A value carrying override provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapped {
    pub origin: Origin,
    pub value: Value,
}

/// Where an override came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Environment,
    CommandLine,
}

/// The resolved shape of a value, with wrappers seen through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    Float,
    Str,
    List,
    Map,
}

impl Value {
    /// Resolved kind of this value; wrapped values report their inner kind.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Wrapped(w) => w.value.kind(),
        }
    }

    /// Wrap this value, recording where the override came from.
    pub fn wrapped(self, origin: Origin) -> Value {
        Value::Wrapped(Box::new(Wrapped {
            origin,
            value: self,
        }))
    }

    /// The override provenance, if any.
    pub fn origin(&self) -> Option<Origin> {
        match self {
            Value::Wrapped(w) => Some(w.origin),
            _ => None,
        }
    }
}

/// Coerce a raw override string: int first, then float, else string.
pub fn coerce(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Str(raw.to_string())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", rendered.join(","))
            }
            Value::Map(entries) => {
                let rendered: Vec<String> =
                    entries.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
                write!(f, "{}", rendered.join(","))
            }
            Value::Wrapped(w) => write!(f, "{}", w.value),
        }
    }
}
