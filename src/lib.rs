//! # sk-general
//!
//! Shape-aware data handling and model registry scaffolding for tabular
//! machine learning workflows.
//!
//! ## Core Design Principles
//!
//! - **Shapes, not types**: data is a dynamic [`data::Value`] tagged with an
//!   open-ended [`data::Shape`] name (`"iter"`, `"dict"`, or anything you
//!   register), and conversions are looked up by `(source, dest)` pair.
//! - **Explicit registries**: converters, verifiers, transformers and model
//!   factories live in registries owned by the component that uses them.
//!   There is no global mutable state.
//! - **Typed failures**: every fallible operation returns a `Result` with a
//!   module-specific error enum.
//!
//! ## Quick Start
//!
//! ```rust
//! use sk_general::data::{ConversionOptions, DataHandler, DataHandling, Shape, Value};
//!
//! let mut handler = DataHandler::builder()
//!     .input_type(Shape::ITER)
//!     .transformation_type(Shape::DICT)
//!     .output_type(Shape::ITER)
//!     .transformer(|data| Ok(data))
//!     .build();
//!
//! handler
//!     .receive_data_with(
//!         Value::from(vec![1, 2]),
//!         &ConversionOptions::new().with_keys(["X", "y"]),
//!     )
//!     .unwrap();
//! handler.transform_data().unwrap();
//!
//! let out = handler
//!     .emit_data_with(&ConversionOptions::new().with_prepend_keys(true))
//!     .unwrap();
//! assert_eq!(
//!     out,
//!     Value::Seq(vec![Value::tuple(["X", "y"]), Value::Int(1), Value::Int(2)])
//! );
//! ```
//!
//! ## Module Structure
//!
//! - `data`: values, shapes, the conversion registry and `DataHandler`
//! - `table`: labelled tables, axis masks, boolean coercion, target extraction
//! - `model`: the `Model` contract, `ModelRegistry` and the `DummyRegressor` baseline
//!
//! The library only emits `tracing` events; install a subscriber to see them.

/// Dynamic values, shapes and the receive/transform/emit data handler.
pub mod data;

/// Model capability contract and name-based model registry.
pub mod model;

/// Labelled tabular data helpers.
pub mod table;

pub use data::{DataConversionRegistry, DataError, DataHandler, DataHandling, Shape, Value};
pub use model::{Model, ModelError, ModelRegistry};
pub use table::{Series, Table, TableError};
