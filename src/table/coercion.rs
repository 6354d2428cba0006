//! Boolean coercion of flag-like columns.

use crate::data::Value;
use crate::table::series::Series;

/// Marker most yes/no columns use for "true".
pub const TRUE_KEY_DEFAULT: &str = "Y";

/// Read a series of flag-like markers as booleans.
///
/// Elements equal to `true_key` become `Some(true)`. With a `false_key`,
/// elements equal to it become `Some(false)` and everything else is
/// indeterminate (`None`). Without one, every non-matching element is
/// `Some(false)`.
///
/// # Example
/// ```
/// use sk_general::data::Value;
/// use sk_general::table::{is_true, Series};
///
/// let flags = Series::new(None, vec!["Y".into(), "N".into(), "?".into()]);
/// let yes = Value::from("Y");
/// let no = Value::from("N");
///
/// assert_eq!(is_true(&flags, &yes, None), vec![Some(true), Some(false), Some(false)]);
/// assert_eq!(is_true(&flags, &yes, Some(&no)), vec![Some(true), Some(false), None]);
/// ```
pub fn is_true(series: &Series, true_key: &Value, false_key: Option<&Value>) -> Vec<Option<bool>> {
    series
        .values()
        .iter()
        .map(|value| coerce(value, true_key, false_key))
        .collect()
}

/// [`is_true`] as a series sharing the input's name and index, with
/// indeterminate elements stored as `Null`.
pub fn is_true_series(series: &Series, true_key: &Value, false_key: Option<&Value>) -> Series {
    series.map(|value| coerce(value, true_key, false_key).map_or(Value::Null, Value::Bool))
}

fn coerce(value: &Value, true_key: &Value, false_key: Option<&Value>) -> Option<bool> {
    if value == true_key {
        return Some(true);
    }
    match false_key {
        Some(key) if value == key => Some(false),
        Some(_) => None,
        None => Some(false),
    }
}
