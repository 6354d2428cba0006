//! Shape identifiers used to route conversions and verification.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Opaque name of a data representation category.
///
/// There is no closed set of shapes: registering a converter or verifier under
/// a new name is all it takes to introduce one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape(Cow<'static, str>);

impl Shape {
    /// Ordered, non-mapping sequences.
    pub const ITER: Shape = Shape(Cow::Borrowed("iter"));
    /// Keyed mappings.
    pub const DICT: Shape = Shape(Cow::Borrowed("dict"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Shape(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Shape {
    fn from(name: &str) -> Self {
        Shape(Cow::Owned(name.to_string()))
    }
}

impl From<String> for Shape {
    fn from(name: String) -> Self {
        Shape(Cow::Owned(name))
    }
}

impl From<&Shape> for Shape {
    fn from(shape: &Shape) -> Self {
        shape.clone()
    }
}

impl PartialEq<str> for Shape {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Shape {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
