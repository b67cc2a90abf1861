//! Column access helpers shared by the stages.
//!
//! Every accessor takes the name of the calling stage so that a missing or
//! mistyped column is reported against the stage that needed it.

use polars::prelude::{Column, DataFrame, DataType};
use sales_common::any_to_string_opt;

use crate::error::{Result, TransformError};

/// Look up a column, failing with [`TransformError::ColumnNotFound`].
pub fn require_column<'a>(
    df: &'a DataFrame,
    name: &str,
    stage: &'static str,
) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::ColumnNotFound {
        stage,
        column: name.to_string(),
    })
}

fn require_numeric<'a>(df: &'a DataFrame, name: &str, stage: &'static str) -> Result<&'a Column> {
    let column = require_column(df, name, stage)?;
    match column.dtype() {
        DataType::String | DataType::Boolean => Err(TransformError::TypeMismatch {
            stage,
            column: name.to_string(),
            expected: "numeric",
            found: column.dtype().to_string(),
        }),
        _ => Ok(column),
    }
}

/// Check that every named column exists and has a numeric dtype.
///
/// Reports the first offending column in `names` order.
pub fn ensure_numeric(df: &DataFrame, names: &[&str], stage: &'static str) -> Result<()> {
    for name in names {
        require_numeric(df, name, stage)?;
    }
    Ok(())
}

/// Read a column as `f64` values, nulls preserved.
///
/// Any numeric dtype is widened. Text and boolean columns are rejected
/// rather than coerced, since a text column here means the extract was
/// malformed upstream.
pub fn numeric_values(df: &DataFrame, name: &str, stage: &'static str) -> Result<Vec<Option<f64>>> {
    let widened = require_numeric(df, name, stage)?.cast(&DataType::Float64)?;
    Ok(widened.f64()?.into_iter().collect())
}

/// Read a text column, nulls preserved.
pub fn text_values(df: &DataFrame, name: &str, stage: &'static str) -> Result<Vec<Option<String>>> {
    let column = require_column(df, name, stage)?;
    if column.dtype() != &DataType::String {
        return Err(TransformError::TypeMismatch {
            stage,
            column: name.to_string(),
            expected: "text",
            found: column.dtype().to_string(),
        });
    }
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Read any column as its display strings, nulls preserved.
///
/// Used for identifiers such as `order_id` and `territory` whose inferred
/// dtype depends on the extract.
pub fn display_values(
    df: &DataFrame,
    name: &str,
    stage: &'static str,
) -> Result<Vec<Option<String>>> {
    let column = require_column(df, name, stage)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_string_opt(column.get(idx)?));
    }
    Ok(values)
}
