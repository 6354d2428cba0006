//! Labelled tabular data and the helpers that prepare it for modelling.
//!
//! - [`Table`] / [`Series`]: column-oriented values with string row labels.
//! - [`axis_mask`]: select rows or columns whose labels match a pattern.
//! - [`is_true`]: read yes/no marker columns as booleans.
//! - [`extract_target`]: split a table into features and target.
//!
//! A table enters a [`DataHandler`](crate::data::DataHandler) through
//! [`Table::to_value`], which produces a `dict` shaped value.

pub mod axis;
pub mod coercion;
pub mod error;
pub mod frame;
pub mod series;
pub mod target;

pub use axis::{axis_mask, Axis, Labelled};
pub use coercion::{is_true, is_true_series, TRUE_KEY_DEFAULT};
pub use error::{Result, TableError};
pub use frame::Table;
pub use series::Series;
pub use target::{extract_target, extract_target_only, DEFAULT_TARGET};
