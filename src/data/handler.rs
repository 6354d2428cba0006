//! Receive, transform and emit data through a conversion registry.
//!
//! A [`DataHandler`] verifies incoming data against its declared input shape,
//! converts it into the transformation shape, runs the registered
//! transformers in order and converts the result into the declared output
//! shape on emission.
//!
//! # Example
//! ```
//! use sk_general::data::{DataHandler, DataHandling, Mapping, Shape, Value};
//!
//! let mut handler = DataHandler::builder()
//!     .input_type(Shape::ITER)
//!     .output_type(Shape::DICT)
//!     .build();
//!
//! let out = handler.run(Value::from(vec![1, 2])).unwrap();
//! assert_eq!(out, Value::Map(Mapping::from([(0, 1), (1, 2)])));
//! ```

use crate::data::error::{DataError, Result};
use crate::data::options::ConversionOptions;
use crate::data::registry::DataConversionRegistry;
use crate::data::shape::Shape;
use crate::data::status::DataStatus;
use crate::data::value::Value;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// What `receive_data` does when no input shape is declared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnverifiedInput {
    /// Skip verification and accept the data as is.
    #[default]
    Accept,
    /// Refuse the data with [`DataError::TypeMismatch`].
    Reject,
}

/// Declared shapes and policies of a [`DataHandler`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataHandlerConfig {
    pub input_type: Option<Shape>,
    pub output_type: Option<Shape>,
    #[serde(alias = "processing_type")]
    pub transformation_type: Option<Shape>,
    pub unverified_input: UnverifiedInput,
}

impl DataHandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_input_type(mut self, shape: impl Into<Shape>) -> Self {
        self.input_type = Some(shape.into());
        self
    }

    pub fn with_output_type(mut self, shape: impl Into<Shape>) -> Self {
        self.output_type = Some(shape.into());
        self
    }

    pub fn with_transformation_type(mut self, shape: impl Into<Shape>) -> Self {
        self.transformation_type = Some(shape.into());
        self
    }

    pub fn with_unverified_input(mut self, policy: UnverifiedInput) -> Self {
        self.unverified_input = policy;
        self
    }
}

/// Capability contract of a data handler: receive, transform, emit.
pub trait DataHandling {
    /// Verify and store incoming data.
    fn receive_data(&mut self, data: Value) -> Result<()>;

    /// Apply transformers to the stored data.
    fn transform_data(&mut self) -> Result<()>;

    /// Produce the stored data in the output shape.
    fn emit_data(&self) -> Result<Value>;

    /// Receive, transform and emit in one call.
    fn run(&mut self, data: Value) -> Result<Value> {
        self.receive_data(data)?;
        self.transform_data()?;
        self.emit_data()
    }
}

/// Converts data between declared shapes around a chain of transformers.
///
/// Each handler owns its registry. Handlers built from the same template
/// registry share its entries but not later registrations.
#[derive(Clone, Debug)]
pub struct DataHandler {
    status: DataStatus,
    registry: DataConversionRegistry,
    unverified_input: UnverifiedInput,
    data: Option<Value>,
}

impl DataHandler {
    /// Create a handler backed by a fresh default registry.
    pub fn new(config: DataHandlerConfig) -> Self {
        Self::with_registry(config, DataConversionRegistry::default())
    }

    /// Create a handler backed by the given registry.
    pub fn with_registry(config: DataHandlerConfig, registry: DataConversionRegistry) -> Self {
        Self {
            status: DataStatus::new(
                config.input_type,
                config.output_type,
                config.transformation_type,
            ),
            registry,
            unverified_input: config.unverified_input,
            data: None,
        }
    }

    pub fn builder() -> DataHandlerBuilder {
        DataHandlerBuilder::new()
    }

    pub fn status(&self) -> &DataStatus {
        &self.status
    }

    /// The payload currently held, if any.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn registry(&self) -> &DataConversionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DataConversionRegistry {
        &mut self.registry
    }

    /// Convert data between two optionally declared shapes using this
    /// handler's registry.
    pub fn convert(
        &self,
        data: Value,
        source: Option<&Shape>,
        dest: Option<&Shape>,
        options: &ConversionOptions,
    ) -> Result<Value> {
        self.registry.convert(data, source, dest, options)
    }

    /// Check `data` against the declared input shape.
    ///
    /// # Errors
    /// - [`DataError::UnknownShape`] if the input shape has no verifier.
    /// - [`DataError::TypeMismatch`] if verification fails, or if no input
    ///   shape is declared and the policy is [`UnverifiedInput::Reject`].
    pub fn verify_input(&self, data: &Value) -> Result<()> {
        match &self.status.input_type {
            Some(shape) => {
                if self.registry.lookup_verifier(shape)?.verify(data) {
                    Ok(())
                } else {
                    Err(DataError::TypeMismatch {
                        expected: shape.to_string(),
                        got: data.type_name().to_string(),
                    })
                }
            }
            None => match self.unverified_input {
                UnverifiedInput::Accept => {
                    debug!("No input checking, assuming correct input type");
                    Ok(())
                }
                UnverifiedInput::Reject => {
                    debug!("No input checking, assuming wrong input type");
                    Err(DataError::TypeMismatch {
                        expected: "a declared input shape".to_string(),
                        got: data.type_name().to_string(),
                    })
                }
            },
        }
    }

    /// Receive data, passing `options` to the input conversion.
    ///
    /// Either fully succeeds or leaves the handler untouched.
    pub fn receive_data_with(&mut self, data: Value, options: &ConversionOptions) -> Result<()> {
        self.verify_input(&data)?;
        let converted = self.registry.convert(
            data,
            self.status.input_type.as_ref(),
            self.status.processing_type.as_ref(),
            options,
        )?;
        self.data = Some(converted);
        self.status.current_type = self.status.received_type();
        debug!(current_type = ?self.status.current_type, "Received data");
        Ok(())
    }

    /// Emit the stored data, passing `options` to the output conversion.
    pub fn emit_data_with(&self, options: &ConversionOptions) -> Result<Value> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| DataError::NoData("emit_data called before receive_data".to_string()))?;
        self.registry.convert(
            data.clone(),
            self.status.current_type.as_ref(),
            self.status.output_type.as_ref(),
            options,
        )
    }

    /// Run the full pipeline with separate options for input and output conversion.
    pub fn run_with(
        &mut self,
        data: Value,
        receive_options: &ConversionOptions,
        emit_options: &ConversionOptions,
    ) -> Result<Value> {
        self.receive_data_with(data, receive_options)?;
        self.transform_data()?;
        self.emit_data_with(emit_options)
    }
}

impl DataHandling for DataHandler {
    fn receive_data(&mut self, data: Value) -> Result<()> {
        self.receive_data_with(data, &ConversionOptions::default())
    }

    fn transform_data(&mut self) -> Result<()> {
        if self.registry.transformers().is_empty() {
            trace!("No transformers registered");
            return Ok(());
        }

        let mut current = self.data.clone().ok_or_else(|| {
            DataError::NoData("transform_data called before receive_data".to_string())
        })?;
        for transformer in self.registry.transformers() {
            current = transformer.transform(current)?;
        }
        self.data = Some(current);

        if let Some(shape) = &self.status.processing_type {
            self.status.current_type = Some(shape.clone());
        }
        debug!(n_transformers = self.registry.transformer_count(), "Transformed data");
        Ok(())
    }

    fn emit_data(&self) -> Result<Value> {
        self.emit_data_with(&ConversionOptions::default())
    }
}

/// Builder for [`DataHandler`].
///
/// Converters, verifiers and transformers added here are merged over the
/// base registry (the default one, or a clone of a template): converters and
/// verifiers override on collision, transformers are appended.
pub struct DataHandlerBuilder {
    config: DataHandlerConfig,
    template: Option<DataConversionRegistry>,
    overrides: DataConversionRegistry,
}

impl Default for DataHandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DataHandlerBuilder {
    pub fn new() -> Self {
        Self {
            config: DataHandlerConfig::default(),
            template: None,
            overrides: DataConversionRegistry::empty(),
        }
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: DataHandlerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn input_type(mut self, shape: impl Into<Shape>) -> Self {
        self.config.input_type = Some(shape.into());
        self
    }

    pub fn output_type(mut self, shape: impl Into<Shape>) -> Self {
        self.config.output_type = Some(shape.into());
        self
    }

    pub fn transformation_type(mut self, shape: impl Into<Shape>) -> Self {
        self.config.transformation_type = Some(shape.into());
        self
    }

    pub fn unverified_input(mut self, policy: UnverifiedInput) -> Self {
        self.config.unverified_input = policy;
        self
    }

    /// Seed the handler with a clone of `template` instead of a default registry.
    pub fn registry(mut self, template: &DataConversionRegistry) -> Self {
        self.template = Some(template.clone());
        self
    }

    pub fn converter<F>(mut self, source: impl Into<Shape>, dest: impl Into<Shape>, f: F) -> Self
    where
        F: Fn(Value, &ConversionOptions) -> Result<Value> + Send + Sync + 'static,
    {
        self.overrides.register_converter(source, dest, f);
        self
    }

    pub fn verifier<F>(mut self, shape: impl Into<Shape>, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.overrides.register_verifier(shape, f);
        self
    }

    pub fn transformer<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.overrides.append_transformer(f);
        self
    }

    pub fn build(self) -> DataHandler {
        let mut registry = self.template.unwrap_or_default();
        registry.merge(self.overrides);
        DataHandler::with_registry(self.config, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::value::{Key, Mapping};

    fn iter_handler() -> DataHandler {
        DataHandler::new(DataHandlerConfig::new().with_input_type(Shape::ITER))
    }

    #[test]
    fn test_receive_stores_data_and_type() {
        let mut handler = iter_handler();
        handler.receive_data(Value::from(vec![1, 2])).unwrap();

        assert_eq!(handler.status().current_type, Some(Shape::ITER));
        assert_eq!(handler.data(), Some(&Value::from(vec![1, 2])));
    }

    #[test]
    fn test_iter_handler_rejects_mapping() {
        let mut handler = iter_handler();
        let result = handler.receive_data(Value::Map(Mapping::from([("a", 1)])));
        assert!(matches!(result, Err(DataError::TypeMismatch { .. })));
    }

    #[test]
    fn test_iter_handler_rejects_scalar() {
        let mut handler = iter_handler();
        let result = handler.receive_data(Value::Int(3));
        assert!(matches!(result, Err(DataError::TypeMismatch { .. })));
    }

    #[test]
    fn test_dict_handler_rejects_sequence() {
        let mut handler = DataHandler::new(DataHandlerConfig::new().with_input_type(Shape::DICT));
        let result = handler.receive_data(Value::from(vec![1, 2]));
        assert!(matches!(result, Err(DataError::TypeMismatch { .. })));
    }

    #[test]
    fn test_failed_receive_leaves_state_untouched() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .transformation_type(Shape::DICT)
            .build();
        handler.receive_data(Value::from(vec![1])).unwrap();
        let before_status = handler.status().clone();
        let before_data = handler.data().cloned();

        assert!(handler.receive_data(Value::Int(9)).is_err());
        assert_eq!(handler.status(), &before_status);
        assert_eq!(handler.data().cloned(), before_data);
    }

    #[test]
    fn test_failed_conversion_leaves_state_untouched() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .transformation_type("frame")
            .build();

        let result = handler.receive_data(Value::from(vec![1]));
        assert!(matches!(result, Err(DataError::UnknownConversion { .. })));
        assert!(handler.data().is_none());
        assert_eq!(handler.status().current_type, Some(Shape::ITER));
    }

    #[test]
    fn test_unknown_input_shape() {
        let mut handler = DataHandler::new(DataHandlerConfig::new().with_input_type("frame"));
        assert!(matches!(
            handler.receive_data(Value::Int(1)),
            Err(DataError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_undeclared_input_accepted_by_default() {
        let mut handler = DataHandler::new(DataHandlerConfig::new());
        handler.receive_data(Value::Int(5)).unwrap();
        assert_eq!(handler.status().current_type, None);
        assert_eq!(handler.emit_data().unwrap(), Value::Int(5));
    }

    #[test]
    fn test_undeclared_input_rejected_by_policy() {
        let mut handler = DataHandler::builder()
            .unverified_input(UnverifiedInput::Reject)
            .build();
        assert!(matches!(
            handler.receive_data(Value::Int(5)),
            Err(DataError::TypeMismatch { .. })
        ));
        assert!(handler.data().is_none());
    }

    #[test]
    fn test_run_iter_to_dict() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .output_type(Shape::DICT)
            .build();
        let out = handler.run(Value::from(vec![1, 2])).unwrap();
        assert_eq!(out, Value::Map(Mapping::from([(0, 1), (1, 2)])));
    }

    #[test]
    fn test_receive_converts_to_transformation_type() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .transformation_type(Shape::DICT)
            .output_type(Shape::ITER)
            .build();

        handler
            .receive_data_with(
                Value::from(vec![1, 2]),
                &ConversionOptions::new().with_keys(["X", "y"]),
            )
            .unwrap();
        assert_eq!(handler.status().current_type, Some(Shape::DICT));
        assert_eq!(
            handler.data(),
            Some(&Value::Map(Mapping::from([("X", 1), ("y", 2)])))
        );

        let emitted = handler
            .emit_data_with(&ConversionOptions::new().with_prepend_keys(true))
            .unwrap();
        assert_eq!(
            emitted,
            Value::Seq(vec![Value::tuple(["X", "y"]), Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_transformers_run_in_order() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .transformer(|data| match data {
                Value::Seq(mut items) => {
                    items.push(Value::Int(10));
                    Ok(Value::Seq(items))
                }
                other => Ok(other),
            })
            .transformer(|data| match data {
                Value::Seq(items) => Ok(Value::Seq(items.into_iter().rev().collect())),
                other => Ok(other),
            })
            .build();

        let out = handler.run(Value::from(vec![1, 2])).unwrap();
        assert_eq!(out, Value::from(vec![10, 2, 1]));
    }

    #[test]
    fn test_transform_sets_current_to_transformation_type() {
        let mut handler = DataHandler::builder()
            .transformation_type(Shape::DICT)
            .output_type(Shape::ITER)
            .transformer(|_data| Ok(Value::Map(Mapping::from([("k", 1)]))))
            .build();

        handler.receive_data(Value::Int(0)).unwrap();
        handler.transform_data().unwrap();
        assert_eq!(handler.status().current_type, Some(Shape::DICT));
        assert_eq!(handler.emit_data().unwrap(), Value::from(vec![1]));
    }

    #[test]
    fn test_failing_transformer_keeps_payload() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .transformer(|data| Ok(data))
            .transformer(|_data| Err(DataError::Transform("boom".to_string())))
            .build();

        handler.receive_data(Value::from(vec![1])).unwrap();
        assert!(matches!(
            handler.transform_data(),
            Err(DataError::Transform(_))
        ));
        assert_eq!(handler.data(), Some(&Value::from(vec![1])));
    }

    #[test]
    fn test_transform_without_transformers_is_noop() {
        let mut handler = iter_handler();
        handler.transform_data().unwrap();
        assert!(handler.data().is_none());
    }

    #[test]
    fn test_transform_before_receive_fails() {
        let mut handler = DataHandler::builder().transformer(|data| Ok(data)).build();
        assert!(matches!(
            handler.transform_data(),
            Err(DataError::NoData(_))
        ));
    }

    #[test]
    fn test_emit_before_receive_fails() {
        let handler = iter_handler();
        assert!(matches!(handler.emit_data(), Err(DataError::NoData(_))));
    }

    #[test]
    fn test_emit_does_not_mutate() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .output_type(Shape::DICT)
            .build();
        handler.receive_data(Value::from(vec![1])).unwrap();

        let first = handler.emit_data().unwrap();
        let second = handler.emit_data().unwrap();
        assert_eq!(first, second);
        assert_eq!(handler.data(), Some(&Value::from(vec![1])));
        assert_eq!(handler.status().current_type, Some(Shape::ITER));
    }

    #[test]
    fn test_missing_output_converter_is_error() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .output_type("frame")
            .build();
        assert!(matches!(
            handler.run(Value::from(vec![1])),
            Err(DataError::UnknownConversion { .. })
        ));
    }

    #[test]
    fn test_receive_again_replaces_payload() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .transformation_type(Shape::DICT)
            .transformer(|data| Ok(data))
            .build();

        handler.receive_data(Value::from(vec![1])).unwrap();
        handler.transform_data().unwrap();
        handler.receive_data(Value::from(vec![7, 8])).unwrap();

        assert_eq!(
            handler.data(),
            Some(&Value::Map(Mapping::from([(0, 7), (1, 8)])))
        );
        assert_eq!(handler.status().current_type, Some(Shape::DICT));
    }

    #[test]
    fn test_builder_overrides_default_verifier() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .verifier(Shape::ITER, |data: &Value| matches!(data, Value::Seq(_)))
            .build();

        assert!(handler.receive_data(Value::tuple([1])).is_err());
        assert!(handler.receive_data(Value::from(vec![1])).is_ok());
    }

    #[test]
    fn test_builder_adds_custom_shape() {
        let mut handler = DataHandler::builder()
            .input_type("csv")
            .output_type(Shape::ITER)
            .verifier("csv", |data: &Value| matches!(data, Value::Str(_)))
            .converter("csv", Shape::ITER, |data, _opts| match data {
                Value::Str(line) => Ok(Value::Seq(
                    line.split(',').map(|s| Value::from(s.trim())).collect(),
                )),
                other => Err(DataError::TypeMismatch {
                    expected: "csv".to_string(),
                    got: other.type_name().to_string(),
                }),
            })
            .build();

        let out = handler.run(Value::from("a, b")).unwrap();
        assert_eq!(out, Value::from(vec!["a", "b"]));
    }

    fn push(marker: i64) -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
        move |data| match data {
            Value::Seq(mut items) => {
                items.push(Value::Int(marker));
                Ok(Value::Seq(items))
            }
            other => Ok(other),
        }
    }

    #[test]
    fn test_builder_transformers_follow_template_transformers() {
        let mut template = DataConversionRegistry::new();
        template.append_transformer(push(1)).append_transformer(push(2));

        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .registry(&template)
            .transformer(push(3))
            .build();

        assert_eq!(handler.registry().transformer_count(), 3);
        assert_eq!(template.transformer_count(), 2);
        let out = handler.run(Value::from(vec![0])).unwrap();
        assert_eq!(out, Value::from(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_builder_converter_replaces_default() {
        let mut handler = DataHandler::builder()
            .input_type(Shape::ITER)
            .output_type(Shape::DICT)
            .converter(Shape::ITER, Shape::DICT, |data, _opts| match data {
                Value::Seq(items) => Ok(Value::Map(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(i, v)| (Key::Str(format!("col{i}")), v))
                        .collect(),
                )),
                other => Ok(other),
            })
            .build();

        let out = handler.run(Value::from(vec![5, 6])).unwrap();
        assert_eq!(out, Value::Map(Mapping::from([("col0", 5), ("col1", 6)])));

        let default = DataHandler::builder()
            .input_type(Shape::ITER)
            .output_type(Shape::DICT)
            .build()
            .run(Value::from(vec![5, 6]))
            .unwrap();
        assert_eq!(default, Value::Map(Mapping::from([(0, 5), (1, 6)])));
    }

    #[test]
    fn test_handlers_from_template_are_isolated() {
        let template = DataConversionRegistry::new();
        let mut first = DataHandler::builder()
            .registry(&template)
            .transformer(|data| Ok(data))
            .build();
        let second = DataHandler::builder().registry(&template).build();

        first.registry_mut().register_verifier("frame", |_data: &Value| true);

        assert_eq!(first.registry().transformer_count(), 1);
        assert_eq!(second.registry().transformer_count(), 0);
        assert!(!second.registry().has_verifier(&Shape::new("frame")));
        assert!(!template.has_verifier(&Shape::new("frame")));
    }

    #[test]
    fn test_config_from_json() {
        let config = DataHandlerConfig::from_json(
            r#"{"input_type": "iter", "processing_type": "dict", "unverified_input": "reject"}"#,
        )
        .unwrap();
        assert_eq!(config.input_type, Some(Shape::ITER));
        assert_eq!(config.transformation_type, Some(Shape::DICT));
        assert_eq!(config.output_type, None);
        assert_eq!(config.unverified_input, UnverifiedInput::Reject);

        assert!(matches!(
            DataHandlerConfig::from_json("{"),
            Err(DataError::Json(_))
        ));
    }

    #[test]
    fn test_handler_as_trait_object() {
        let mut handler: Box<dyn DataHandling> = Box::new(
            DataHandler::builder()
                .input_type(Shape::DICT)
                .output_type(Shape::ITER)
                .build(),
        );
        let out = handler
            .run(Value::Map(Mapping::from([("a", 1), ("b", 2)])))
            .unwrap();
        assert_eq!(out, Value::from(vec![1, 2]));
    }
}
