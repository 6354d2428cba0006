//! End-to-end example: from a labelled table to baseline predictions.
//!
//! This example walks through:
//! - Building a small house price table with a yes/no flag column
//! - Coercing the flag column to booleans
//! - Selecting feature columns by label pattern
//! - Splitting off the target
//! - Reshaping the features with a `DataHandler` (dict -> iter with key header)
//! - Creating a baseline model by name from a JSON config
//!
//! Run with: RUST_LOG=debug cargo run --example tabular_handler

use sk_general::{
    data::{ConversionOptions, DataHandler, DataHandling, Shape, Value},
    model::{ModelConfig, ModelRegistry},
    table::{axis_mask, extract_target, is_true, Axis, Table, TRUE_KEY_DEFAULT},
};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Tabular Handler Demo ===\n");

    // 1. Raw table
    let table = Table::from_columns([
        (
            "sqft_living",
            vec![Value::Int(1400), Value::Int(2100), Value::Int(900), Value::Int(1750)],
        ),
        (
            "sqft_lot",
            vec![Value::Int(5000), Value::Int(7200), Value::Int(3100), Value::Int(6000)],
        ),
        ("garage", vec!["Y".into(), "N".into(), "N".into(), "Y".into()]),
        (
            "target",
            vec![
                Value::Float(310.0),
                Value::Float(455.0),
                Value::Float(199.0),
                Value::Float(402.0),
            ],
        ),
    ])?
    .with_index(vec!["h1".into(), "h2".into(), "h3".into(), "h4".into()])?;
    println!("Loaded {} rows x {} columns", table.n_rows(), table.n_columns());

    // 2. Flag coercion
    let garage = is_true(&table.column("garage")?, &Value::from(TRUE_KEY_DEFAULT), None);
    println!("Has garage: {:?}", garage);

    // 3. Feature selection by label
    let sqft_mask = axis_mask(&table, "^sqft_", Axis::Columns, true)?;
    let sqft_columns: Vec<&str> = table
        .columns()
        .iter()
        .zip(&sqft_mask)
        .filter(|(_, keep)| **keep)
        .map(|(name, _)| name.as_str())
        .collect();
    println!("Area columns: {:?}", sqft_columns);

    // 4. Target split
    let (x, y) = extract_target(&table, None)?;
    println!("Features: {:?}", x.columns());

    // 5. Reshape features through a handler
    let mut handler = DataHandler::builder()
        .input_type(Shape::DICT)
        .output_type(Shape::ITER)
        .transformer(|data| match data {
            Value::Map(mut columns) => {
                columns.insert("n_features", Value::Int(columns.len() as i64));
                Ok(Value::Map(columns))
            }
            other => Ok(other),
        })
        .build();

    handler.receive_data(x.to_value())?;
    handler.transform_data()?;
    let rows = handler.emit_data_with(&ConversionOptions::new().with_prepend_keys(true))?;
    println!("Handler output: {}", rows.to_json());

    // 6. Baseline model from config
    let config: ModelConfig = serde_json::from_str(
        r#"{"model": "sk_general.model.DummyRegressor", "params": {"strategy": "median"}}"#,
    )?;
    let registry = ModelRegistry::with_defaults();
    let mut model = registry.create_from_config(&config)?;
    model.fit(&x, &y)?;
    let predictions = model.predict(&x)?;
    println!("{} predictions: {:?}", model.name(), predictions);

    Ok(())
}
