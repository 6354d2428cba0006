//! Error types for models and the model registry.

use thiserror::Error;

/// Result alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Error type for model resolution, fitting and prediction.
#[derive(Error, Debug)]
pub enum ModelError {
    /// A model name or dotted path could not be resolved.
    #[error("Registry resolution failed: {0}")]
    RegistryResolution(String),

    /// `predict` called before `fit`.
    #[error("Model not fitted: {0}")]
    NotFitted(String),

    /// Invalid hyperparameter value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Target or feature values are not numeric.
    #[error("Non-numeric data: {0}")]
    NonNumeric(String),

    /// Feature count differs from the one seen during fit.
    #[error("Feature mismatch: expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    /// Feature rows and target length disagree.
    #[error("Length mismatch: {expected} rows in X, {got} values in y")]
    LengthMismatch { expected: usize, got: usize },
}
