//! Shape-aware data handling.
//!
//! Data moves through a [`DataHandler`] in three steps:
//!
//! 1. **receive**: verified against the input shape, then converted to the
//!    transformation shape;
//! 2. **transform**: passed through the registered transformers in order;
//! 3. **emit**: converted from its current shape to the output shape.
//!
//! Every conversion is looked up in a [`DataConversionRegistry`] keyed by
//! [`Shape`] names. The default registry knows the `iter` and `dict` shapes;
//! anything else is added by registering converters and verifiers.

pub mod conversions;
pub mod error;
pub mod handler;
pub mod options;
pub mod registry;
pub mod shape;
pub mod status;
pub mod value;

pub use conversions::{dict_to_iter, is_dict, is_iter, iter_to_dict};
pub use error::{DataError, Result};
pub use handler::{
    DataHandler, DataHandlerBuilder, DataHandlerConfig, DataHandling, UnverifiedInput,
};
pub use options::ConversionOptions;
pub use registry::{ConversionKey, Converter, DataConversionRegistry, DataTransformer, Verifier};
pub use shape::Shape;
pub use status::DataStatus;
pub use value::{Key, Mapping, Value};
