//! Column-oriented table with labelled rows.

use crate::data::{Key, Mapping, Value};
use crate::table::error::{Result, TableError};
use crate::table::series::{default_index, Series};

/// A set of equal-length named columns sharing one row index.
///
/// # Example
/// ```
/// use sk_general::data::Value;
/// use sk_general::table::Table;
///
/// let table = Table::from_columns([
///     ("a", vec![Value::Int(1), Value::Int(2)]),
///     ("b", vec![Value::Int(3), Value::Int(4)]),
/// ])
/// .unwrap();
///
/// assert_eq!(table.n_rows(), 2);
/// assert_eq!(table.columns(), &["a".to_string(), "b".to_string()]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    index: Vec<String>,
    columns: Vec<String>,
    data: Vec<Vec<Value>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs with a positional index.
    ///
    /// # Errors
    /// - [`TableError::LengthMismatch`] if columns differ in length.
    /// - [`TableError::DuplicateColumn`] if a name repeats.
    pub fn from_columns<S, I>(columns: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<Value>)>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    /// Replace the row labels.
    pub fn with_index(mut self, index: Vec<String>) -> Result<Self> {
        if !self.columns.is_empty() && index.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                expected: self.index.len(),
                got: index.len(),
            });
        }
        self.index = index;
        Ok(self)
    }

    /// Append a column.
    ///
    /// The first column of an index-less table sets a positional index.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.contains_column(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if self.columns.is_empty() && self.index.is_empty() {
            self.index = default_index(values.len());
        } else if values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                expected: self.index.len(),
                got: values.len(),
            });
        }
        self.columns.push(name);
        self.data.push(values);
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Values of one column, borrowed.
    pub fn column_values(&self, name: &str) -> Option<&[Value]> {
        self.position(name).map(|i| self.data[i].as_slice())
    }

    /// One column as a [`Series`] carrying the table's index.
    pub fn column(&self, name: &str) -> Result<Series> {
        let i = self
            .position(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        Series::with_index(
            Some(name.to_string()),
            self.index.clone(),
            self.data[i].clone(),
        )
    }

    /// A copy of the table without the named column.
    pub fn drop_column(&self, name: &str) -> Result<Table> {
        let i = self
            .position(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        let mut out = self.clone();
        out.columns.remove(i);
        out.data.remove(i);
        Ok(out)
    }

    /// Row `i` as numbers, `None` if out of range or any cell is not numeric.
    pub fn row_f64(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.n_rows() {
            return None;
        }
        self.data.iter().map(|col| col[i].as_f64()).collect()
    }

    /// The table as a `dict` shaped value: column name to list of values.
    pub fn to_value(&self) -> Value {
        let mapping: Mapping = self
            .columns
            .iter()
            .zip(&self.data)
            .map(|(name, values)| (Key::from(name.as_str()), Value::Seq(values.clone())))
            .collect();
        Value::Map(mapping)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
