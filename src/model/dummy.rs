//! Baseline regressor that ignores its features.
//!
//! Predicts one constant learned from the training target: its mean, median,
//! a quantile, or a user supplied value. Useful as a floor to compare real
//! models against.
//!
//! # Example
//! ```
//! use sk_general::data::Value;
//! use sk_general::model::{DummyRegressor, DummyStrategy, Model};
//! use sk_general::table::{Series, Table};
//!
//! let x = Table::from_columns([("a", vec![Value::Int(0); 3])]).unwrap();
//! let y = Series::new(None, vec![Value::Int(1), Value::Int(2), Value::Int(6)]);
//!
//! let mut model = DummyRegressor::new().with_strategy(DummyStrategy::Median);
//! model.fit(&x, &y).unwrap();
//! assert_eq!(model.predict(&x).unwrap(), vec![2.0, 2.0, 2.0]);
//! ```

use crate::data::Value;
use crate::model::error::{ModelError, Result};
use crate::model::{Model, ModelFactory, ModelParams};
use crate::table::{Series, Table};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the constant prediction is derived from the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DummyStrategy {
    /// Mean of the target.
    #[default]
    Mean,
    /// Median of the target.
    Median,
    /// The `quantile` of the target, linearly interpolated.
    Quantile,
    /// The user supplied `constant`.
    Constant,
}

/// Hyperparameters of a [`DummyRegressor`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DummyRegressorConfig {
    pub strategy: DummyStrategy,
    /// Prediction for [`DummyStrategy::Constant`].
    pub constant: Option<f64>,
    /// Quantile in `[0, 1]` for [`DummyStrategy::Quantile`].
    pub quantile: Option<f64>,
}

impl DummyRegressorConfig {
    /// Check that the chosen strategy has what it needs.
    pub fn validate(&self) -> Result<()> {
        match self.strategy {
            DummyStrategy::Quantile => match self.quantile {
                Some(q) if (0.0..=1.0).contains(&q) => Ok(()),
                Some(q) => Err(ModelError::InvalidParameter(format!(
                    "quantile must be in [0, 1], got {q}"
                ))),
                None => Err(ModelError::InvalidParameter(
                    "strategy 'quantile' requires a quantile".to_string(),
                )),
            },
            DummyStrategy::Constant if self.constant.is_none() => Err(
                ModelError::InvalidParameter("strategy 'constant' requires a constant".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Overlay `params` onto this config.
    fn apply(&self, params: &ModelParams) -> Result<Self> {
        let mut json = serde_json::to_value(self)
            .map_err(|e| ModelError::InvalidParameter(e.to_string()))?;
        if let serde_json::Value::Object(fields) = &mut json {
            for (key, value) in params {
                fields.insert(key.clone(), value.to_json());
            }
        }
        serde_json::from_value(json).map_err(|e| ModelError::InvalidParameter(e.to_string()))
    }
}

/// Regressor predicting a single constant.
#[derive(Clone, Debug, Default)]
pub struct DummyRegressor {
    config: DummyRegressorConfig,
    constant_: Option<f64>,
    n_features: Option<usize>,
}

impl DummyRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: DummyRegressorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: DummyStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.config.constant = Some(constant);
        self
    }

    pub fn with_quantile(mut self, quantile: f64) -> Self {
        self.config.quantile = Some(quantile);
        self
    }

    pub fn config(&self) -> &DummyRegressorConfig {
        &self.config
    }

    /// The learned constant, once fitted.
    pub fn constant(&self) -> Option<f64> {
        self.constant_
    }
}

impl Model for DummyRegressor {
    fn name(&self) -> &str {
        "DummyRegressor"
    }

    fn fit(&mut self, x: &Table, y: &Series) -> Result<()> {
        self.config.validate()?;
        if y.is_empty() {
            return Err(ModelError::EmptyData("cannot fit on an empty target".to_string()));
        }
        if x.n_rows() != y.len() {
            return Err(ModelError::LengthMismatch {
                expected: x.n_rows(),
                got: y.len(),
            });
        }
        let mut target = y
            .to_f64()
            .ok_or_else(|| ModelError::NonNumeric("target must be numeric".to_string()))?;

        let constant = match self.config.strategy {
            DummyStrategy::Mean => target.iter().sum::<f64>() / target.len() as f64,
            DummyStrategy::Median => quantile(&mut target, 0.5),
            DummyStrategy::Quantile => quantile(&mut target, self.config.quantile.unwrap_or(0.5)),
            DummyStrategy::Constant => self.config.constant.unwrap_or_default(),
        };
        debug!(strategy = ?self.config.strategy, constant, "Fitted DummyRegressor");

        self.constant_ = Some(constant);
        self.n_features = Some(x.n_columns());
        Ok(())
    }

    fn predict(&self, x: &Table) -> Result<Vec<f64>> {
        let constant = self
            .constant_
            .ok_or_else(|| ModelError::NotFitted("call fit before predict".to_string()))?;
        if let Some(expected) = self.n_features {
            if x.n_columns() != expected {
                return Err(ModelError::FeatureMismatch {
                    expected,
                    got: x.n_columns(),
                });
            }
        }
        Ok(vec![constant; x.n_rows()])
    }

    fn set_params(&mut self, params: &ModelParams) -> Result<()> {
        let config = self.config.apply(params)?;
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

/// Builds [`DummyRegressor`]s from parameter maps.
pub struct DummyRegressorFactory;

impl ModelFactory for DummyRegressorFactory {
    fn create(&self, params: &ModelParams) -> Result<Box<dyn Model>> {
        let mut model = DummyRegressor::new();
        model.set_params(params)?;
        Ok(Box::new(model))
    }

    fn model_type(&self) -> &str {
        "DummyRegressor"
    }
}

/// Linearly interpolated quantile. `values` must be non-empty; it is sorted in place.
fn quantile(values: &mut [f64], q: f64) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let pos = q * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    values[lo] + (values[hi] - values[lo]) * (pos - lo as f64)
}

impl From<DummyStrategy> for Value {
    fn from(strategy: DummyStrategy) -> Self {
        let name = match strategy {
            DummyStrategy::Mean => "mean",
            DummyStrategy::Median => "median",
            DummyStrategy::Quantile => "quantile",
            DummyStrategy::Constant => "constant",
        };
        Value::from(name)
    }
}
