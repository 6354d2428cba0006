//! Axis selection and label masking.

use crate::table::error::{Result, TableError};
use crate::table::frame::Table;
use crate::table::series::Series;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which set of labels to address: row labels or column names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Axis 0.
    #[default]
    Index,
    /// Axis 1.
    Columns,
}

impl TryFrom<usize> for Axis {
    type Error = TableError;

    fn try_from(axis: usize) -> Result<Self> {
        match axis {
            0 => Ok(Axis::Index),
            1 => Ok(Axis::Columns),
            other => Err(TableError::InvalidAxis(format!(
                "axis {other} does not exist, expected 0 or 1"
            ))),
        }
    }
}

impl FromStr for Axis {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        let axis = match s {
            "index" => Axis::Index,
            "columns" => Axis::Columns,
            _ => {
                return Err(TableError::InvalidAxis(format!(
                    "'{s}': if passed as a str, axis must be one of 'columns' or 'index'"
                )))
            }
        };
        debug!(?axis, "Converted str-type axis");
        Ok(axis)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Index => f.write_str("index"),
            Axis::Columns => f.write_str("columns"),
        }
    }
}

/// Anything with string labels along one or more axes.
pub trait Labelled {
    /// Labels along `axis`, or [`TableError::InvalidAxis`] if the axis does not exist.
    fn axis_labels(&self, axis: Axis) -> Result<&[String]>;
}

impl Labelled for Table {
    fn axis_labels(&self, axis: Axis) -> Result<&[String]> {
        Ok(match axis {
            Axis::Index => self.index(),
            Axis::Columns => self.columns(),
        })
    }
}

impl Labelled for Series {
    fn axis_labels(&self, axis: Axis) -> Result<&[String]> {
        match axis {
            Axis::Index => Ok(self.index()),
            Axis::Columns => Err(TableError::InvalidAxis(
                "a series has no columns axis".to_string(),
            )),
        }
    }
}

/// Boolean mask over the labels of `axis` that contain `pattern`.
///
/// With `regex`, `pattern` is a regular expression searched anywhere in the
/// label; otherwise it is a plain substring.
///
/// # Example
/// ```
/// use sk_general::data::Value;
/// use sk_general::table::{axis_mask, Axis, Table};
///
/// let table = Table::from_columns([
///     ("price_2020", vec![Value::Int(1)]),
///     ("area", vec![Value::Int(2)]),
/// ])
/// .unwrap();
///
/// let mask = axis_mask(&table, r"_\d{4}$", Axis::Columns, true).unwrap();
/// assert_eq!(mask, vec![true, false]);
/// ```
pub fn axis_mask<L>(labelled: &L, pattern: &str, axis: Axis, regex: bool) -> Result<Vec<bool>>
where
    L: Labelled + ?Sized,
{
    let labels = labelled.axis_labels(axis)?;
    if regex {
        let re = Regex::new(pattern)?;
        Ok(labels.iter().map(|label| re.is_match(label)).collect())
    } else {
        Ok(labels.iter().map(|label| label.contains(pattern)).collect())
    }
}
