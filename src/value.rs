//! Field values tagged with their value category

use crate::checker::parse_time;
use crate::error::{Result, ValidationError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value categories a checker specializes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Int,
    Float,
    Bool,
    Array,
    Map,
    Time,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
            ValueKind::Time => "time",
        };
        f.write_str(name)
    }
}

/// A concrete field value, resolved to its category before validation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Time(DateTime<Utc>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
            Value::Time(_) => ValueKind::Time,
        }
    }

    /// Zero value of a category, used for absent fields
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::String => Value::String(String::new()),
            ValueKind::Int => Value::Int(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Array => Value::Array(Vec::new()),
            ValueKind::Map => Value::Map(BTreeMap::new()),
            ValueKind::Time => Value::Time(DateTime::<Utc>::UNIX_EPOCH),
        }
    }

    /// Coerce a JSON value into the declared category
    ///
    /// Times are read from strings through [`parse_time`] or from integer Unix
    /// seconds. Array elements and map entries take their category from the
    /// JSON itself.
    pub fn from_json(json: &serde_json::Value, kind: ValueKind) -> Result<Self> {
        let mismatch = || ValidationError::InvalidValue {
            kind,
            reason: format!("cannot read {} as {}", json, kind),
        };

        match kind {
            ValueKind::String => json.as_str().map(Value::from).ok_or_else(mismatch),
            ValueKind::Int => json.as_i64().map(Value::Int).ok_or_else(mismatch),
            ValueKind::Float => json.as_f64().map(Value::Float).ok_or_else(mismatch),
            ValueKind::Bool => json.as_bool().map(Value::Bool).ok_or_else(mismatch),
            ValueKind::Array => match json {
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(Value::infer_json)
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array),
                _ => Err(mismatch()),
            },
            ValueKind::Map => match json {
                serde_json::Value::Object(entries) => entries
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), Value::infer_json(value)?)))
                    .collect::<Result<BTreeMap<_, _>>>()
                    .map(Value::Map),
                _ => Err(mismatch()),
            },
            ValueKind::Time => match json {
                serde_json::Value::String(s) => parse_time(s)
                    .map(Value::Time)
                    .map_err(|reason| ValidationError::InvalidValue { kind, reason }),
                serde_json::Value::Number(n) => n
                    .as_i64()
                    .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
                    .map(Value::Time)
                    .ok_or_else(mismatch),
                _ => Err(mismatch()),
            },
        }
    }

    /// Build a value taking its category from the JSON type
    pub fn infer_json(json: &serde_json::Value) -> Result<Self> {
        let kind = match json {
            serde_json::Value::String(_) => ValueKind::String,
            serde_json::Value::Bool(_) => ValueKind::Bool,
            serde_json::Value::Number(n) if n.is_i64() => ValueKind::Int,
            serde_json::Value::Number(_) => ValueKind::Float,
            serde_json::Value::Array(_) => ValueKind::Array,
            serde_json::Value::Object(_) => ValueKind::Map,
            serde_json::Value::Null => {
                return Err(ValidationError::InvalidValue {
                    kind: ValueKind::String,
                    reason: "null has no value category".to_string(),
                })
            }
        };
        Value::from_json(json, kind)
    }
}

/// Textual form used by regex and membership checks
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("map[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                f.write_str("]")
            }
            Value::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_with_kind() {
        assert_eq!(
            Value::from_json(&json!("abc"), ValueKind::String).unwrap(),
            Value::from("abc")
        );
        assert_eq!(
            Value::from_json(&json!(42), ValueKind::Int).unwrap(),
            Value::Int(42)
        );
        assert_eq!(
            Value::from_json(&json!(42), ValueKind::Float).unwrap(),
            Value::Float(42.0)
        );
        assert!(Value::from_json(&json!("42"), ValueKind::Int).is_err());
        assert!(Value::from_json(&json!(null), ValueKind::Bool).is_err());
    }

    #[test]
    fn test_from_json_collections() {
        let array = Value::from_json(&json!(["a", 1, 2.5, true]), ValueKind::Array).unwrap();
        assert_eq!(
            array,
            Value::Array(vec![
                Value::from("a"),
                Value::Int(1),
                Value::Float(2.5),
                Value::Bool(true),
            ])
        );

        let map = Value::from_json(&json!({"b": 1, "a": [1]}), ValueKind::Map).unwrap();
        assert_eq!(map.to_string(), "map[a:[1] b:1]");
    }

    #[test]
    fn test_from_json_time() {
        let from_secs = Value::from_json(&json!(1737292665), ValueKind::Time).unwrap();
        let from_str = Value::from_json(&json!("1737292665"), ValueKind::Time).unwrap();
        assert_eq!(from_secs, from_str);
        assert!(Value::from_json(&json!("not-a-date"), ValueKind::Time).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::from(vec![1, 2, 3]).to_string(), "[1 2 3]");
        assert_eq!(
            Value::Time(DateTime::<Utc>::UNIX_EPOCH).to_string(),
            "1970-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_kind_serde() {
        let kind: ValueKind = serde_json::from_str("\"time\"").unwrap();
        assert_eq!(kind, ValueKind::Time);
        assert_eq!(Value::zero(kind).kind(), ValueKind::Time);
    }
}
