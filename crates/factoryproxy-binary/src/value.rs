use bytes::Bytes;
use serde_json::{Map, Number};

use crate::types;

/// A node of the object graph carried by `write_object`/`read_object`.
///
/// Maps are ordered pairs, not hash maps: iteration order is part of the
/// encoded bytes.
///
/// Equality is bitwise for `Float` and `Double`, so a decoded `NaN` equals the
/// one that was written and `0.0` differs from `-0.0`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// UTF-16 code unit.
    Char(u16),
    String(String),
    ByteArray(Bytes),
    Collection(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::ByteArray(a), Value::ByteArray(b)) => a == b,
            (Value::Collection(a), Value::Collection(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Build a map with string keys, preserving the iteration order of `entries`.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Value::String(k.into()), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The type code this node is written with.
    pub fn type_code(&self) -> u8 {
        match self {
            Value::Null => types::NULL,
            Value::Bool(_) => types::BOOL,
            Value::Byte(_) => types::BYTE,
            Value::Short(_) => types::SHORT,
            Value::Int(_) => types::INT,
            Value::Long(_) => types::LONG,
            Value::Float(_) => types::FLOAT,
            Value::Double(_) => types::DOUBLE,
            Value::Char(_) => types::CHAR,
            Value::String(_) => types::STRING,
            Value::ByteArray(_) => types::BYTE_ARR,
            Value::Collection(_) => types::COL,
            Value::Map(_) => types::MAP,
        }
    }

    /// Convert a JSON document into an object graph.
    ///
    /// Integers become `Int` when they fit in 32 bits and `Long` otherwise;
    /// other numbers become `Double`. Object member order is kept.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => number_to_value(n),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Collection(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(members) => Value::Map(
                members
                    .iter()
                    .map(|(k, v)| (Value::String(k.clone()), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render this object graph as JSON for display.
    ///
    /// Lossy: non-string map keys are rendered as their JSON text, byte arrays
    /// become arrays of numbers, and non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Byte(v) => serde_json::Value::from(*v),
            Value::Short(v) => serde_json::Value::from(*v),
            Value::Int(v) => serde_json::Value::from(*v),
            Value::Long(v) => serde_json::Value::from(*v),
            Value::Float(v) => float_to_json(f64::from(*v)),
            Value::Double(v) => float_to_json(*v),
            Value::Char(c) => serde_json::Value::String(
                char::from_u32(u32::from(*c))
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
                    .to_string(),
            ),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::ByteArray(data) => {
                serde_json::Value::Array(data.iter().map(|b| serde_json::Value::from(*b)).collect())
            }
            Value::Collection(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => {
                let mut members = Map::new();
                for (k, v) in entries {
                    let key = match k {
                        Value::String(s) => s.clone(),
                        other => other.to_json().to_string(),
                    };
                    members.insert(key, v.to_json());
                }
                serde_json::Value::Object(members)
            }
        }
    }
}

fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return match i32::try_from(i) {
            Ok(small) => Value::Int(small),
            Err(_) => Value::Long(i),
        };
    }
    Value::Double(n.as_f64().unwrap_or(f64::NAN))
}

fn float_to_json(v: f64) -> serde_json::Value {
    Number::from_f64(v)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Collection(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
