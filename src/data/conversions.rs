//! Base converters and verifiers between the `iter` and `dict` shapes.
//!
//! These are the entries every default [`DataConversionRegistry`] is seeded
//! with. They are plain functions so they can be called directly as well as
//! through the registry.
//!
//! [`DataConversionRegistry`]: crate::data::DataConversionRegistry

use crate::data::error::{DataError, Result};
use crate::data::options::ConversionOptions;
use crate::data::value::{Key, Mapping, Value};
use tracing::{debug, warn};

/// Convert a sequence of values to a mapping.
///
/// Keys are chosen in this order:
/// 1. `options.keys`, if present and non-empty, zipped positionally with the values;
/// 2. positional indices `0, 1, 2, ...` when `options.index_as_keys` is set;
/// 3. otherwise the first element of the sequence, zipped against the rest.
///
/// When keys and values differ in length the result stops at the shorter of
/// the two.
///
/// # Errors
/// - [`DataError::TypeMismatch`] if `data` is not a list or tuple.
/// - [`DataError::InvalidKey`] if the key row is missing or holds unhashable values.
pub fn iter_to_dict(data: Value, options: &ConversionOptions) -> Result<Value> {
    let items = match data {
        Value::Seq(items) | Value::Tuple(items) => items,
        other => {
            return Err(DataError::TypeMismatch {
                expected: "a sequence".to_string(),
                got: other.type_name().to_string(),
            })
        }
    };

    let mapping = match options.keys.as_ref().filter(|keys| !keys.is_empty()) {
        Some(keys) => zip_keys(keys.clone(), items.into_iter()),
        None if options.index_as_keys => {
            debug!("No keys specified, taking index position as keys");
            (0i64..).map(Key::Int).zip(items).collect()
        }
        None => {
            debug!("No keys specified, taking keys from first element of sequence");
            let mut items = items.into_iter();
            let header = items.next().ok_or_else(|| {
                DataError::InvalidKey("empty sequence has no key row".to_string())
            })?;
            zip_keys(key_row(header)?, items)
        }
    };

    Ok(Value::Map(mapping))
}

/// Convert a mapping to a list of its values in insertion order.
///
/// With `options.prepend_keys`, a tuple of all keys becomes the first element,
/// which `iter_to_dict` with `index_as_keys = false` reads back.
///
/// # Errors
/// [`DataError::TypeMismatch`] if `data` is not a mapping.
pub fn dict_to_iter(data: Value, options: &ConversionOptions) -> Result<Value> {
    let mapping = match data {
        Value::Map(mapping) => mapping,
        other => {
            return Err(DataError::TypeMismatch {
                expected: "a mapping".to_string(),
                got: other.type_name().to_string(),
            })
        }
    };

    let mut out = Vec::with_capacity(mapping.len() + usize::from(options.prepend_keys));
    if options.prepend_keys {
        out.push(Value::Tuple(mapping.keys().cloned().map(Value::from).collect()));
    }
    out.extend(mapping.into_values());
    Ok(Value::Seq(out))
}

/// Verifier for the `iter` shape: lists and tuples, never mappings or scalars.
pub fn is_iter(data: &Value) -> bool {
    data.is_sequence()
}

/// Verifier for the `dict` shape.
pub fn is_dict(data: &Value) -> bool {
    data.is_mapping()
}

fn key_row(header: Value) -> Result<Vec<Key>> {
    match header {
        Value::Seq(keys) | Value::Tuple(keys) => keys.into_iter().map(Key::try_from).collect(),
        other => Err(DataError::InvalidKey(format!(
            "expected the first element to be a sequence of keys, got {}",
            other.type_name()
        ))),
    }
}

fn zip_keys(keys: Vec<Key>, values: impl ExactSizeIterator<Item = Value>) -> Mapping {
    if keys.len() != values.len() {
        warn!(
            n_keys = keys.len(),
            n_values = values.len(),
            "Key and value counts differ, truncating to the shorter"
        );
    }
    keys.into_iter().zip(values).collect()
}
