//! Shape bookkeeping for a [`DataHandler`](crate::data::DataHandler).

use crate::data::shape::Shape;
use serde::{Deserialize, Serialize};

/// Declared and current shapes of a handler's payload.
///
/// `current_type` always names the shape of the payload the handler holds
/// right now; emission converts from it to `output_type`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStatus {
    /// Shape of data as received. `None` disables verification.
    pub input_type: Option<Shape>,
    /// Shape of data as emitted. `None` disables output conversion.
    pub output_type: Option<Shape>,
    /// Shape the payload is converted into before transformers run.
    pub processing_type: Option<Shape>,
    /// Shape of the payload currently held.
    pub current_type: Option<Shape>,
}

impl DataStatus {
    /// Create a status whose current shape starts out as the input shape.
    pub fn new(
        input_type: Option<Shape>,
        output_type: Option<Shape>,
        processing_type: Option<Shape>,
    ) -> Self {
        Self {
            current_type: input_type.clone(),
            input_type,
            output_type,
            processing_type,
        }
    }

    /// Alias for `processing_type`.
    pub fn transformation_type(&self) -> Option<&Shape> {
        self.processing_type.as_ref()
    }

    /// Shape held after a successful receive: the processing shape when one
    /// is declared, otherwise the unconverted input shape.
    pub(crate) fn received_type(&self) -> Option<Shape> {
        self.processing_type
            .clone()
            .or_else(|| self.input_type.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_starts_as_input() {
        let status = DataStatus::new(Some(Shape::ITER), Some(Shape::DICT), None);
        assert_eq!(status.current_type, Some(Shape::ITER));
        assert_eq!(status.transformation_type(), None);
    }

    #[test]
    fn test_received_type_prefers_processing() {
        let status = DataStatus::new(Some(Shape::ITER), None, Some(Shape::DICT));
        assert_eq!(status.received_type(), Some(Shape::DICT));

        let status = DataStatus::new(Some(Shape::ITER), None, None);
        assert_eq!(status.received_type(), Some(Shape::ITER));

        assert_eq!(DataStatus::default().received_type(), None);
    }

    #[test]
    fn test_status_serializes() {
        let status = DataStatus::new(Some(Shape::ITER), None, Some(Shape::DICT));
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["input_type"], "iter");
        assert_eq!(json["output_type"], serde_json::Value::Null);
        assert_eq!(json["current_type"], "iter");
    }
}
