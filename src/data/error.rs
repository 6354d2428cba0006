//! Error types for data handling operations.

use crate::data::shape::Shape;
use thiserror::Error;

/// Result alias for data handling operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Error type for conversion, verification and transformation.
#[derive(Error, Debug)]
pub enum DataError {
    /// Data does not match its declared shape.
    #[error("Incorrect input type: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// No converter is registered for the requested pair of shapes.
    #[error("No converter registered from '{from}' to '{to}'")]
    UnknownConversion { from: Shape, to: Shape },

    /// No verifier is registered for the declared shape.
    #[error("No verifier registered for shape '{0}'")]
    UnknownShape(Shape),

    /// A value could not be used as a mapping key.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// An operation needed a payload before one was received.
    #[error("No data: {0}")]
    NoData(String),

    /// A transformer rejected its input.
    #[error("Transform failed: {0}")]
    Transform(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_type_mismatch() {
        let err = DataError::TypeMismatch {
            expected: "iter".to_string(),
            got: "map".to_string(),
        };
        assert!(err.to_string().contains("Incorrect input type"));
        assert!(err.to_string().contains("map"));
    }

    #[test]
    fn test_error_display_unknown_conversion() {
        let err = DataError::UnknownConversion {
            from: Shape::ITER,
            to: Shape::new("frame"),
        };
        assert_eq!(
            err.to_string(),
            "No converter registered from 'iter' to 'frame'"
        );
    }

    #[test]
    fn test_error_display_unknown_shape() {
        let err = DataError::UnknownShape(Shape::new("frame"));
        assert!(err.to_string().contains("frame"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err: DataError = json_err.into();
        assert!(matches!(err, DataError::Json(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = DataError::NoData("nothing received".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
