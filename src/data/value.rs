//! Dynamic payload values routed through the conversion registry.
//!
//! Data handed to a [`DataHandler`](crate::data::DataHandler) has no static
//! shape: it may arrive as a list, a tuple, a keyed mapping or a bare scalar.
//! [`Value`] models that payload, [`Key`] is the hashable subset usable as a
//! mapping key, and [`Mapping`] is an insertion-ordered key/value map.

use crate::data::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A hashable value usable as a [`Mapping`] key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Str(String),
    Tuple(Vec<Key>),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{}", b),
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
            Key::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl TryFrom<Value> for Key {
    type Error = DataError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(Key::Bool(b)),
            Value::Int(i) => Ok(Key::Int(i)),
            Value::Str(s) => Ok(Key::Str(s)),
            Value::Tuple(items) => items
                .into_iter()
                .map(Key::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Key::Tuple),
            other => Err(DataError::InvalidKey(format!(
                "{} values cannot be used as mapping keys",
                other.type_name()
            ))),
        }
    }
}

/// Insertion-ordered mapping from [`Key`] to [`Value`].
///
/// Re-inserting an existing key replaces its value in place, so the key keeps
/// its original position. Equality ignores ordering.
#[derive(Clone, Default)]
pub struct Mapping {
    entries: Vec<(Key, Value)>,
    positions: HashMap<Key, usize>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mapping with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a value, returning the previous value stored under `key`.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.positions.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Consume the mapping, yielding its values in insertion order.
    pub fn into_values(self) -> impl Iterator<Item = Value> {
        self.entries.into_iter().map(|(_, v)| v)
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl FromIterator<(Key, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        mapping.extend(iter);
        mapping
    }
}

impl Extend<(Key, Value)> for Mapping {
    fn extend<I: IntoIterator<Item = (Key, Value)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Mapping {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<Key>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Mapping {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}

/// A dynamically shaped payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A growable list.
    Seq(Vec<Value>),
    /// A fixed tuple, e.g. the key header produced by `dict_to_iter`.
    Tuple(Vec<Value>),
    Map(Mapping),
}

impl Value {
    /// Build a tuple value.
    pub fn tuple<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Name of the runtime variant, for logging and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Seq(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "map",
        }
    }

    /// True for ordered, non-mapping containers (lists and tuples).
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Seq(_) | Value::Tuple(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Numeric view of the value; booleans count as 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Parse a JSON document into a value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let parsed: serde_json::Value = serde_json::from_str(json)?;
        Ok(Value::from(parsed))
    }

    /// Render as JSON. Mapping keys are stringified and tuples become arrays.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Seq(items) | Value::Tuple(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(m) => serde_json::Value::Object(
                m.iter().map(|(k, v)| (k.to_string(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Key::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Value::Bool(b),
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::Str(s),
            Key::Tuple(items) => Value::Tuple(items.into_iter().map(Value::from).collect()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Map(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_insert_replaces_in_place() {
        let mut m = Mapping::new();
        m.insert("a", 1);
        m.insert("b", 2);
        let previous = m.insert("a", 3);

        assert_eq!(previous, Some(Value::Int(1)));
        assert_eq!(m.len(), 2);
        let keys: Vec<&Key> = m.keys().collect();
        assert_eq!(keys, vec![&Key::from("a"), &Key::from("b")]);
        assert_eq!(m.get(&Key::from("a")), Some(&Value::Int(3)));
    }

    #[test]
    fn test_mapping_lookup_after_many_inserts() {
        let mut m: Mapping = (0..1000i64).map(|i| (Key::Int(i), Value::Int(i * 2))).collect();
        assert_eq!(m.len(), 1000);
        assert_eq!(m.get(&Key::Int(999)), Some(&Value::Int(1998)));
        assert!(!m.contains_key(&Key::Int(1000)));

        m.insert(500i64, "replaced");
        assert_eq!(m.len(), 1000);
        assert_eq!(m.get(&Key::Int(500)), Some(&Value::from("replaced")));
        assert_eq!(m.keys().nth(500), Some(&Key::Int(500)));
    }

    #[test]
    fn test_mapping_equality_ignores_order() {
        let a = Mapping::from([("x", 1), ("y", 2)]);
        let b = Mapping::from([("y", 2), ("x", 1)]);
        assert_eq!(a, b);

        let c = Mapping::from([("x", 1), ("y", 3)]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_key_from_tuple_value() {
        let value = Value::tuple(["X", "y"]);
        let key = Key::try_from(value).unwrap();
        assert_eq!(key, Key::Tuple(vec![Key::from("X"), Key::from("y")]));
        assert_eq!(key.to_string(), "(X, y)");
    }

    #[test]
    fn test_float_and_list_are_not_keys() {
        assert!(matches!(
            Key::try_from(Value::Float(1.5)),
            Err(DataError::InvalidKey(_))
        ));
        assert!(matches!(
            Key::try_from(Value::from(vec![1, 2])),
            Err(DataError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_value_shape_predicates() {
        assert!(Value::from(vec![1, 2]).is_sequence());
        assert!(Value::tuple([1, 2]).is_sequence());
        assert!(!Value::from("ab").is_sequence());
        assert!(Value::Map(Mapping::new()).is_mapping());
        assert!(!Value::Int(1).is_mapping());
    }

    #[test]
    fn test_json_roundtrip_keeps_structure() {
        let value = Value::from_json_str(r#"{"a": [1, 2.5, "x"], "b": null}"#).unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(
            map.get(&Key::from("a")),
            Some(&Value::Seq(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::from("x")
            ]))
        );
        assert_eq!(map.get(&Key::from("b")), Some(&Value::Null));

        let json = value.to_json();
        assert_eq!(json["a"][0], serde_json::json!(1));
    }

    #[test]
    fn test_to_json_stringifies_int_keys() {
        let value = Value::Map(Mapping::from([(0, "a"), (1, "b")]));
        assert_eq!(value.to_json(), serde_json::json!({"0": "a", "1": "b"}));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(matches!(
            Value::from_json_str("{not json"),
            Err(DataError::Json(_))
        ));
    }
}
