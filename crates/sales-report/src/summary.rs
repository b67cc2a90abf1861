//! Grouped summaries and year pivots.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use sales_model::columns::{
    ORDER_ID, PRODUCT_LINE, QUANTITY, TERRITORY, TOTAL_SALES, YEAR, YEAR_MONTH,
};
use tracing::debug;

use crate::error::Result;
use crate::values::{integers, numbers, text};

#[derive(Debug, Default)]
struct Bucket<'a> {
    revenue: f64,
    units: f64,
    orders: BTreeSet<&'a str>,
}

/// Revenue, units sold and distinct orders per (month, product line,
/// territory).
///
/// Output columns: `month`, `product_line`, `territory`, `revenue`,
/// `units_sold`, `num_orders`, sorted by the three keys. Rows with a null key
/// are left out. Null sales or quantities count as zero.
pub fn monthly_summary(df: &DataFrame) -> Result<DataFrame> {
    let months = text(df, YEAR_MONTH)?;
    let lines = text(df, PRODUCT_LINE)?;
    let territories = text(df, TERRITORY)?;
    let sales = numbers(df, TOTAL_SALES)?;
    let quantity = numbers(df, QUANTITY)?;
    let orders = text(df, ORDER_ID)?;

    let mut buckets: BTreeMap<(&str, &str, &str), Bucket<'_>> = BTreeMap::new();
    for idx in 0..df.height() {
        let (Some(month), Some(line), Some(territory)) = (
            months[idx].as_deref(),
            lines[idx].as_deref(),
            territories[idx].as_deref(),
        ) else {
            continue;
        };
        let bucket = buckets.entry((month, line, territory)).or_default();
        bucket.revenue += sales[idx].unwrap_or(0.0);
        bucket.units += quantity[idx].unwrap_or(0.0);
        if let Some(order) = orders[idx].as_deref() {
            bucket.orders.insert(order);
        }
    }

    let mut month_col = Vec::with_capacity(buckets.len());
    let mut line_col = Vec::with_capacity(buckets.len());
    let mut territory_col = Vec::with_capacity(buckets.len());
    let mut revenue = Vec::with_capacity(buckets.len());
    let mut units_sold = Vec::with_capacity(buckets.len());
    let mut num_orders = Vec::with_capacity(buckets.len());
    for ((month, line, territory), bucket) in &buckets {
        month_col.push(*month);
        line_col.push(*line);
        territory_col.push(*territory);
        revenue.push(bucket.revenue);
        units_sold.push(bucket.units.round() as i64);
        num_orders.push(bucket.orders.len() as i64);
    }

    debug!(groups = buckets.len(), "built monthly summary");
    Ok(DataFrame::new(vec![
        Series::new("month".into(), month_col).into_column(),
        Series::new("product_line".into(), line_col).into_column(),
        Series::new("territory".into(), territory_col).into_column(),
        Series::new("revenue".into(), revenue).into_column(),
        Series::new("units_sold".into(), units_sold).into_column(),
        Series::new("num_orders".into(), num_orders).into_column(),
    ])?)
}

/// Row dimension of a year pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotIndex {
    ProductLine,
    Territory,
}

impl PivotIndex {
    pub fn column(&self) -> &'static str {
        match self {
            Self::ProductLine => PRODUCT_LINE,
            Self::Territory => TERRITORY,
        }
    }

    /// Sheet name used when the pivot is exported.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::ProductLine => "Product_Analysis",
            Self::Territory => "Territory_Analysis",
        }
    }
}

/// Total sales per index value and year.
///
/// The first column holds the index values in ascending order; each further
/// column is one year, ascending, named by the year. Combinations with no
/// sales are null.
pub fn sales_pivot(df: &DataFrame, index: PivotIndex) -> Result<DataFrame> {
    let keys = text(df, index.column())?;
    let years = integers(df, YEAR)?;
    let sales = numbers(df, TOTAL_SALES)?;

    let mut cells: BTreeMap<&str, BTreeMap<i64, f64>> = BTreeMap::new();
    let mut all_years = BTreeSet::new();
    for idx in 0..df.height() {
        let key = keys[idx].as_deref();
        let (Some(key), Some(year), Some(value)) = (key, years[idx], sales[idx]) else {
            continue;
        };
        *cells.entry(key).or_default().entry(year).or_default() += value;
        all_years.insert(year);
    }

    let mut columns: Vec<Column> = Vec::with_capacity(all_years.len() + 1);
    let labels: Vec<&str> = cells.keys().copied().collect();
    columns.push(Series::new(index.column().into(), labels).into_column());
    for year in &all_years {
        let values: Vec<Option<f64>> = cells
            .values()
            .map(|by_year| by_year.get(year).copied())
            .collect();
        columns.push(Series::new(year.to_string().into(), values).into_column());
    }
    Ok(DataFrame::new(columns)?)
}
