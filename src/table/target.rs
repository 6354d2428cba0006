//! Splitting a target column off a feature table.

use crate::table::error::Result;
use crate::table::frame::Table;
use crate::table::series::Series;
use tracing::{debug, info};

/// Column name assumed when none is given.
pub const DEFAULT_TARGET: &str = "target";

/// Split `table` into features `X` and target `y`.
///
/// # Errors
/// [`TableError::MissingColumn`](crate::table::TableError::MissingColumn) if
/// the target column does not exist.
pub fn extract_target(table: &Table, target_name: Option<&str>) -> Result<(Table, Series)> {
    let name = resolve_name(target_name);
    let y = table.column(name)?;
    debug!("Returning table and target as (X, y)");
    Ok((table.drop_column(name)?, y))
}

/// Return only the target column.
pub fn extract_target_only(table: &Table, target_name: Option<&str>) -> Result<Series> {
    let name = resolve_name(target_name);
    let y = table.column(name)?;
    debug!("Returning target variable as series");
    Ok(y)
}

fn resolve_name(target_name: Option<&str>) -> &str {
    let name = match target_name {
        Some(name) => name,
        None => {
            info!(default = DEFAULT_TARGET, "No target name specified, assuming default");
            DEFAULT_TARGET
        }
    };
    info!(column = name, "Extracting target from table");
    name
}
