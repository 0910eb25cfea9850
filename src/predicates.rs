//! Interchangeable classification predicates for [`Value`].
//!
//! Several implementations of the same three checks are kept side by side so
//! `benches/predicates.rs` can compare their cost. The top-level `is_str`,
//! `is_list`, `is_map`, and `is_num` functions are the canonical entry points
//! used by the rest of the crate; all variants must agree on every input.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::value::{Kind, Origin, Value};

/// Is this a string, including wrapped strings?
pub fn is_str(v: &Value) -> bool {
    direct::is_str(v)
}

/// Is this a list, including wrapped lists?
pub fn is_list(v: &Value) -> bool {
    direct::is_list(v)
}

/// Is this a map, including wrapped maps?
pub fn is_map(v: &Value) -> bool {
    direct::is_map(v)
}

/// Is this numeric (int or float), including wrapped numbers?
pub fn is_num(v: &Value) -> bool {
    matches!(v.kind(), Kind::Int | Kind::Float)
}

/// Structural match with an unwrapping fast path: check the plain variant
/// first, fall through to the wrapper only when needed.
pub mod direct {
    use super::Value;

    pub fn is_str(v: &Value) -> bool {
        match v {
            Value::Str(_) => true,
            Value::Wrapped(w) => is_str(&w.value),
            _ => false,
        }
    }

    pub fn is_list(v: &Value) -> bool {
        match v {
            Value::List(_) => true,
            Value::Wrapped(w) => is_list(&w.value),
            _ => false,
        }
    }

    pub fn is_map(v: &Value) -> bool {
        match v {
            Value::Map(_) => true,
            Value::Wrapped(w) => is_map(&w.value),
            _ => false,
        }
    }
}

/// Compute the resolved [`Kind`] once, then compare.
pub mod cached_kind {
    use super::{Kind, Value};

    pub fn is_str(v: &Value) -> bool {
        let k = v.kind();
        k == Kind::Str
    }

    pub fn is_list(v: &Value) -> bool {
        let k = v.kind();
        k == Kind::List
    }

    pub fn is_map(v: &Value) -> bool {
        let k = v.kind();
        k == Kind::Map
    }
}

/// Like `cached_kind`, but comparing against module-level kind aliases
/// instead of naming the enum variants inline.
pub mod kind_alias {
    use super::{Kind, Value};

    pub const STR_KIND: Kind = Kind::Str;
    pub const LIST_KIND: Kind = Kind::List;
    pub const MAP_KIND: Kind = Kind::Map;

    pub fn is_str(v: &Value) -> bool {
        v.kind() == STR_KIND
    }

    pub fn is_list(v: &Value) -> bool {
        v.kind() == LIST_KIND
    }

    pub fn is_map(v: &Value) -> bool {
        v.kind() == MAP_KIND
    }
}

/// A labelled input for the predicate benchmark.
pub struct Case {
    pub label: &'static str,
    pub value: Value,
}

/// The inputs every variant is measured against: each plain shape, its
/// wrapped form, and a scalar that matches nothing.
pub static DATA: Lazy<Vec<Case>> = Lazy::new(|| {
    vec![
        Case {
            label: "String",
            value: Value::Str(String::new()),
        },
        Case {
            label: "List",
            value: Value::List(Vec::new()),
        },
        Case {
            label: "Map",
            value: Value::Map(BTreeMap::new()),
        },
        Case {
            label: "WrappedString",
            value: Value::Str(String::new()).wrapped(Origin::Environment),
        },
        Case {
            label: "WrappedList",
            value: Value::List(Vec::new()).wrapped(Origin::Environment),
        },
        Case {
            label: "WrappedMap",
            value: Value::Map(BTreeMap::new()).wrapped(Origin::Environment),
        },
        Case {
            label: "Int",
            value: Value::Int(0),
        },
    ]
});
