//! Item identifiers

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::SelectionError;

/// Opaque item identifier, either a string or an integer.
///
/// Equality is by value, so `Id::Int(1)` and `Id::Str("1")` are different items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Str(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{}", n),
            Id::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Str(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::Str(s)
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Int(n)
    }
}

impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Id::Int(n.into())
    }
}

impl From<u32> for Id {
    fn from(n: u32) -> Self {
        Id::Int(n.into())
    }
}

/// Converts an untyped JSON value into an id list.
///
/// Only arrays whose elements are all strings or integers are accepted.
/// `what` names the argument in the error message.
pub fn ids_from_value(value: &Value, what: &'static str) -> Result<Vec<Id>, SelectionError> {
    let Value::Array(items) = value else {
        return Err(SelectionError::InvalidArgument {
            what,
            found: describe(value),
        });
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(Id::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(Id::Int).ok_or_else(|| {
                SelectionError::InvalidArgument {
                    what,
                    found: format!("array containing non-integer number {}", n),
                }
            }),
            other => Err(SelectionError::InvalidArgument {
                what,
                found: format!("array containing {}", describe(other)),
            }),
        })
        .collect()
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod id_tests;
