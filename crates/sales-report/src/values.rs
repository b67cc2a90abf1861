//! Column readers tolerant of the dtypes a processed CSV may come back with.

use polars::prelude::{Column, DataFrame};
use sales_common::{any_to_f64, any_to_i64, any_to_string_opt};

use crate::error::{ReportError, Result};

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| ReportError::MissingColumn {
        column: name.to_string(),
    })
}

pub(crate) fn text(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = column(df, name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_string_opt(column.get(idx)?));
    }
    Ok(values)
}

pub(crate) fn numbers(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = column(df, name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(column.get(idx)?));
    }
    Ok(values)
}

pub(crate) fn integers(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = column(df, name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_i64(column.get(idx)?));
    }
    Ok(values)
}
