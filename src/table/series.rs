//! One-dimensional labelled column.

use crate::data::Value;
use crate::table::error::{Result, TableError};

/// A named, index-labelled sequence of values.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    name: Option<String>,
    index: Vec<String>,
    values: Vec<Value>,
}

impl Series {
    /// Create a series with a positional index `"0", "1", ...`.
    pub fn new(name: Option<String>, values: Vec<Value>) -> Self {
        Self {
            name,
            index: default_index(values.len()),
            values,
        }
    }

    /// Create a series with explicit index labels.
    ///
    /// # Errors
    /// [`TableError::LengthMismatch`] if `index` and `values` differ in length.
    pub fn with_index(
        name: Option<String>,
        index: Vec<String>,
        values: Vec<Value>,
    ) -> Result<Self> {
        if index.len() != values.len() {
            return Err(TableError::LengthMismatch {
                expected: index.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            name,
            index,
            values,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at the given index label.
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.index
            .iter()
            .position(|l| l == label)
            .map(|i| &self.values[i])
    }

    /// Pairs of (index label, value).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.index.iter().map(String::as_str).zip(&self.values)
    }

    /// Numeric view of the values, `None` if any value is not a number.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        self.values.iter().map(Value::as_f64).collect()
    }

    /// A series with the same name and index, each value passed through `f`.
    pub fn map<F>(&self, f: F) -> Series
    where
        F: FnMut(&Value) -> Value,
    {
        Series {
            name: self.name.clone(),
            index: self.index.clone(),
            values: self.values.iter().map(f).collect(),
        }
    }

    /// The values as a `Seq`, dropping index and name.
    pub fn to_value(&self) -> Value {
        Value::Seq(self.values.clone())
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

pub(crate) fn default_index(len: usize) -> Vec<String> {
    (0..len).map(|i| i.to_string()).collect()
}
