//! Keyword options passed through to converters.

use crate::data::value::Key;
use serde::{Deserialize, Serialize};

/// Options understood by the base converters.
///
/// Custom converters receive the same struct and may ignore it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Explicit keys for sequence to mapping conversion.
    pub keys: Option<Vec<Key>>,
    /// Use positional indices as keys when no keys are given.
    /// When false, the first element of the sequence supplies the keys.
    pub index_as_keys: bool,
    /// Prepend a tuple of the mapping's keys when converting to a sequence.
    pub prepend_keys: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            keys: None,
            index_as_keys: true,
            prepend_keys: false,
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set explicit keys.
    pub fn with_keys<K: Into<Key>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Set whether positional indices become keys.
    pub fn with_index_as_keys(mut self, index_as_keys: bool) -> Self {
        self.index_as_keys = index_as_keys;
        self
    }

    /// Set whether the key tuple is prepended.
    pub fn with_prepend_keys(mut self, prepend_keys: bool) -> Self {
        self.prepend_keys = prepend_keys;
        self
    }
}
