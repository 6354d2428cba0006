//! Model capability contract and registry.
//!
//! Any estimator that can be fitted on a feature [`Table`] and target
//! [`Series`] implements [`Model`]. Estimators are built by name through a
//! [`ModelRegistry`] of [`ModelFactory`] instances, so configuration can
//! refer to models as strings.
//!
//! # Example
//! ```
//! use sk_general::data::Value;
//! use sk_general::model::{ModelParams, ModelRegistry};
//! use sk_general::table::{Series, Table};
//!
//! let registry = ModelRegistry::with_defaults();
//! let mut model = registry.create("DummyRegressor", &ModelParams::new()).unwrap();
//!
//! let x = Table::from_columns([("a", vec![Value::Int(1), Value::Int(2)])]).unwrap();
//! let y = Series::new(None, vec![Value::Float(1.0), Value::Float(3.0)]);
//! model.fit(&x, &y).unwrap();
//! assert_eq!(model.predict(&x).unwrap(), vec![2.0, 2.0]);
//! ```

pub mod dummy;
pub mod error;
pub mod registry;

pub use dummy::{DummyRegressor, DummyRegressorConfig, DummyRegressorFactory, DummyStrategy};
pub use error::{ModelError, Result};
pub use registry::{ModelConfig, ModelRegistry, ModelResolver, ModuleResolver, BUILTIN_MODULE};

use crate::data::Value;
use crate::table::{Series, Table};
use std::collections::BTreeMap;

/// Hyperparameters by name.
pub type ModelParams = BTreeMap<String, Value>;

/// An estimator that learns from `(X, y)` and predicts numeric targets.
pub trait Model: Send {
    /// Name the model is registered under.
    fn name(&self) -> &str;

    /// Learn from features `x` and target `y`.
    fn fit(&mut self, x: &Table, y: &Series) -> Result<()>;

    /// One prediction per row of `x`.
    fn predict(&self, x: &Table) -> Result<Vec<f64>>;

    /// Update hyperparameters. Invalid params leave the model unchanged.
    fn set_params(&mut self, params: &ModelParams) -> Result<()>;
}

/// Builds models of one type.
pub trait ModelFactory: Send + Sync {
    fn create(&self, params: &ModelParams) -> Result<Box<dyn Model>>;

    /// Default registration name.
    fn model_type(&self) -> &str;
}
