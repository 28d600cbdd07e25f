//! Caller-supplied lookups for `name()` placeholders.
//!
//! The parser asks the context once per function literal, keyed by the
//! literal text including parentheses (`"now()"`), and bakes the answer into
//! the expression as a plain literal.

use std::collections::{BTreeMap, HashMap};

use crate::{
    ast::{Literal, Number},
    convert::json_to_value,
    value::Value,
};

/// Read-only key/value lookup consulted while parsing.
pub trait Context {
    fn lookup(&self, key: &str) -> Option<Value>;

    /// An empty context resolves every placeholder to `null`.
    fn is_empty(&self) -> bool {
        false
    }
}

impl Context for HashMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }
}

impl Context for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

impl Context for serde_json::Map<String, serde_json::Value> {
    fn lookup(&self, key: &str) -> Option<Value> {
        self.get(key).cloned().map(json_to_value)
    }

    fn is_empty(&self) -> bool {
        serde_json::Map::is_empty(self)
    }
}

/// Turns a looked-up context value into a literal by its runtime type.
pub fn resolve_literal(value: Option<Value>) -> Literal {
    match value {
        None | Some(Value::Null) => Literal::Null,
        Some(Value::Integer(n)) => Literal::Number(Number::from(n)),
        Some(Value::Float(n)) => match Number::from_f64(n) {
            Some(d) => Literal::Number(d),
            None => Literal::String(n.to_string()),
        },
        Some(Value::Boolean(b)) => Literal::Boolean(b),
        Some(other) => Literal::String(other.to_display_string()),
    }
}
