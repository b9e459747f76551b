// ============================================================================
// uetools-core/src/args/value.rs
// ============================================================================
//
// BOUND VALUES: Typed Argument Values and the Arguments Map
//
// KEY COMPONENTS:
// - Value: A typed value (string, integer, boolean)
// - Arguments: The flat name -> value mapping handed to `execute`
//
// Choice-typed fields are stored as `Value::Str` holding one of the allowed
// choices.

use crate::error::{CoreResult, binding_error};
use std::collections::BTreeMap;
use std::fmt;

/// A typed argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Bound arguments for one command invocation.
///
/// Produced by the binder; every required field is present. Optional fields
/// without a value are simply missing from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: BTreeMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// String value of a required field.
    pub fn str(&self, name: &str) -> CoreResult<&str> {
        self.opt_str(name)
            .ok_or_else(|| binding_error(format!("argument '{}' has no string value", name)))
    }

    /// String value of an optional field.
    pub fn opt_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Value::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer value of a required field.
    pub fn int(&self, name: &str) -> CoreResult<i64> {
        match self.values.get(name) {
            Some(Value::Int(i)) => Ok(*i),
            _ => Err(binding_error(format!(
                "argument '{}' has no integer value",
                name
            ))),
        }
    }

    /// Boolean value of a flag. Unset flags read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Bool(true)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let mut args = Arguments::new();
        args.insert("project", "RTSGame");
        args.insert("port", 8123_i64);
        args.insert("dry", true);

        assert_eq!(args.str("project").unwrap(), "RTSGame");
        assert_eq!(args.int("port").unwrap(), 8123);
        assert!(args.flag("dry"));
        assert!(!args.flag("missing"));
        assert_eq!(args.opt_str("address"), None);
        assert!(args.str("port").is_err());
        assert!(args.int("project").is_err());
    }
}
