//! Converter, verifier and transformer registry.
//!
//! The registry is a table of trait objects keyed by shape names, so handlers
//! dispatch conversions without matching on a closed set of variants. Plain
//! closures implement the traits through blanket impls; named types can
//! implement them directly when they need state or a `Debug` representation.

use crate::data::conversions::{dict_to_iter, is_dict, is_iter, iter_to_dict};
use crate::data::error::{DataError, Result};
use crate::data::options::ConversionOptions;
use crate::data::shape::Shape;
use crate::data::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Maps data from one shape to another.
pub trait Converter: Send + Sync {
    fn convert(&self, data: Value, options: &ConversionOptions) -> Result<Value>;
}

impl<F> Converter for F
where
    F: Fn(Value, &ConversionOptions) -> Result<Value> + Send + Sync,
{
    fn convert(&self, data: Value, options: &ConversionOptions) -> Result<Value> {
        self(data, options)
    }
}

/// Confirms that data matches a shape.
pub trait Verifier: Send + Sync {
    fn verify(&self, data: &Value) -> bool;
}

impl<F> Verifier for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn verify(&self, data: &Value) -> bool {
        self(data)
    }
}

/// Rewrites data within the transformation shape.
pub trait DataTransformer: Send + Sync {
    fn transform(&self, data: Value) -> Result<Value>;
}

impl<F> DataTransformer for F
where
    F: Fn(Value) -> Result<Value> + Send + Sync,
{
    fn transform(&self, data: Value) -> Result<Value> {
        self(data)
    }
}

/// Ordered pair of (source, destination) shapes.
pub type ConversionKey = (Shape, Shape);

/// Tables of converters, verifiers and transformers.
///
/// Cloning is cheap: entries are reference counted, so a registry can serve
/// as a template that handlers copy at construction and then extend
/// independently.
#[derive(Clone)]
pub struct DataConversionRegistry {
    converters: HashMap<ConversionKey, Arc<dyn Converter>>,
    verifiers: HashMap<Shape, Arc<dyn Verifier>>,
    transformers: Vec<Arc<dyn DataTransformer>>,
}

impl Default for DataConversionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DataConversionRegistry {
    /// Create a registry seeded with the base `iter`/`dict` converters and verifiers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry
            .register_converter(Shape::ITER, Shape::DICT, iter_to_dict)
            .register_converter(Shape::DICT, Shape::ITER, dict_to_iter)
            .register_verifier(Shape::ITER, is_iter)
            .register_verifier(Shape::DICT, is_dict);
        registry
    }

    /// Create a registry with no entries at all.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
            verifiers: HashMap::new(),
            transformers: Vec::new(),
        }
    }

    /// Register a converter, replacing any previous one for the same pair.
    pub fn register_converter<F>(
        &mut self,
        source: impl Into<Shape>,
        dest: impl Into<Shape>,
        converter: F,
    ) -> &mut Self
    where
        F: Fn(Value, &ConversionOptions) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert_converter(source, dest, Arc::new(converter))
    }

    /// Register a converter trait object.
    pub fn insert_converter(
        &mut self,
        source: impl Into<Shape>,
        dest: impl Into<Shape>,
        converter: Arc<dyn Converter>,
    ) -> &mut Self {
        self.converters.insert((source.into(), dest.into()), converter);
        self
    }

    /// Register a verifier, replacing any previous one for the same shape.
    pub fn register_verifier<F>(&mut self, shape: impl Into<Shape>, verifier: F) -> &mut Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.insert_verifier(shape, Arc::new(verifier))
    }

    /// Register a verifier trait object.
    pub fn insert_verifier(
        &mut self,
        shape: impl Into<Shape>,
        verifier: Arc<dyn Verifier>,
    ) -> &mut Self {
        self.verifiers.insert(shape.into(), verifier);
        self
    }

    /// Append a transformer after the existing ones.
    pub fn append_transformer<F>(&mut self, transformer: F) -> &mut Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.transformers.push(Arc::new(transformer));
        self
    }

    /// Append several transformers, keeping their order.
    pub fn extend_transformers(
        &mut self,
        transformers: impl IntoIterator<Item = Arc<dyn DataTransformer>>,
    ) -> &mut Self {
        self.transformers.extend(transformers);
        self
    }

    /// Fold `other` into this registry.
    ///
    /// Converters and verifiers from `other` win on key collisions; its
    /// transformers are appended after the existing ones.
    pub fn merge(&mut self, other: DataConversionRegistry) -> &mut Self {
        self.converters.extend(other.converters);
        self.verifiers.extend(other.verifiers);
        self.transformers.extend(other.transformers);
        self
    }

    /// Look up the converter for an ordered pair of shapes.
    ///
    /// # Errors
    /// [`DataError::UnknownConversion`] if none is registered.
    pub fn lookup_converter(&self, source: &Shape, dest: &Shape) -> Result<&dyn Converter> {
        self.converters
            .get(&(source.clone(), dest.clone()))
            .map(|c| c.as_ref())
            .ok_or_else(|| DataError::UnknownConversion {
                from: source.clone(),
                to: dest.clone(),
            })
    }

    /// Look up the verifier for a shape.
    ///
    /// # Errors
    /// [`DataError::UnknownShape`] if none is registered.
    pub fn lookup_verifier(&self, shape: &Shape) -> Result<&dyn Verifier> {
        self.verifiers
            .get(shape)
            .map(|v| v.as_ref())
            .ok_or_else(|| DataError::UnknownShape(shape.clone()))
    }

    /// Convert `data` between two optionally declared shapes.
    ///
    /// Returns `data` unchanged when the shapes are equal or either one is
    /// undeclared. Otherwise the registered converter runs; a missing
    /// converter is an error, never a pass-through.
    pub fn convert(
        &self,
        data: Value,
        source: Option<&Shape>,
        dest: Option<&Shape>,
        options: &ConversionOptions,
    ) -> Result<Value> {
        match (source, dest) {
            (Some(source), Some(dest)) if source == dest => Ok(data),
            (Some(source), Some(dest)) => {
                trace!(%source, %dest, "Converting data");
                self.lookup_converter(source, dest)?.convert(data, options)
            }
            _ => {
                trace!("Shape undeclared, skipping conversion");
                Ok(data)
            }
        }
    }

    /// Transformers in application order.
    pub fn transformers(&self) -> &[Arc<dyn DataTransformer>] {
        &self.transformers
    }

    pub fn transformer_count(&self) -> usize {
        self.transformers.len()
    }

    pub fn has_converter(&self, source: &Shape, dest: &Shape) -> bool {
        self.converters.contains_key(&(source.clone(), dest.clone()))
    }

    pub fn has_verifier(&self, shape: &Shape) -> bool {
        self.verifiers.contains_key(shape)
    }

    /// Registered conversion pairs, sorted for stable output.
    pub fn converter_keys(&self) -> Vec<&ConversionKey> {
        let mut keys: Vec<_> = self.converters.keys().collect();
        keys.sort();
        keys
    }
}

impl fmt::Debug for DataConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut verifiers: Vec<_> = self.verifiers.keys().collect();
        verifiers.sort();
        f.debug_struct("DataConversionRegistry")
            .field("converters", &self.converter_keys())
            .field("verifiers", &verifiers)
            .field("transformers", &self.transformers.len())
            .finish()
    }
}
