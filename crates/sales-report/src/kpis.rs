//! Headline indicators over a processed dataset.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use sales_model::columns::{
    CUSTOMER_SEGMENT, ORDER_STATUS, PRODUCT_LINE, TERRITORY, TOTAL_SALES, YEAR, YEAR_MONTH,
};
use serde::Serialize;

use crate::error::Result;
use crate::values::{integers, numbers, text};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRevenue {
    pub product_line: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTerritoryRevenue {
    pub segment: String,
    pub territory: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGrowth {
    pub year: i64,
    pub revenue: f64,
    /// Change against the previous year in percent; `None` for the first year
    /// or when the previous year had no revenue.
    pub growth_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub rows: usize,
}

/// Indicators computed by [`compute_kpis`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesKpis {
    /// Ascending by month.
    pub monthly_revenue: Vec<MonthlyRevenue>,
    /// Descending by revenue.
    pub top_products: Vec<ProductRevenue>,
    /// Ascending by segment, then territory.
    pub segment_territory: Vec<SegmentTerritoryRevenue>,
    /// Ascending by year.
    pub yoy_growth: Vec<YearGrowth>,
    /// Descending by row count.
    pub status_distribution: Vec<StatusCount>,
}

fn revenue_by<K: Ord + Clone>(keys: &[Option<K>], sales: &[Option<f64>]) -> BTreeMap<K, f64> {
    let mut totals = BTreeMap::new();
    for (key, value) in keys.iter().zip(sales) {
        if let Some(key) = key {
            *totals.entry(key.clone()).or_insert(0.0) += value.unwrap_or(0.0);
        }
    }
    totals
}

fn by_revenue_desc(a: &ProductRevenue, b: &ProductRevenue) -> Ordering {
    b.revenue
        .total_cmp(&a.revenue)
        .then_with(|| a.product_line.cmp(&b.product_line))
}

/// Compute every indicator. Rows with a null grouping key are ignored for
/// that indicator only.
pub fn compute_kpis(df: &DataFrame) -> Result<SalesKpis> {
    let sales = numbers(df, TOTAL_SALES)?;

    let monthly_revenue = revenue_by(&text(df, YEAR_MONTH)?, &sales)
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenue { month, revenue })
        .collect();

    let mut top_products: Vec<ProductRevenue> = revenue_by(&text(df, PRODUCT_LINE)?, &sales)
        .into_iter()
        .map(|(product_line, revenue)| ProductRevenue {
            product_line,
            revenue,
        })
        .collect();
    top_products.sort_by(by_revenue_desc);

    let pairs: Vec<Option<(String, String)>> = text(df, CUSTOMER_SEGMENT)?
        .into_iter()
        .zip(text(df, TERRITORY)?)
        .map(|(segment, territory)| segment.zip(territory))
        .collect();
    let segment_territory = revenue_by(&pairs, &sales)
        .into_iter()
        .map(|((segment, territory), revenue)| SegmentTerritoryRevenue {
            segment,
            territory,
            revenue,
        })
        .collect();

    let mut previous: Option<f64> = None;
    let yoy_growth = revenue_by(&integers(df, YEAR)?, &sales)
        .into_iter()
        .map(|(year, revenue)| {
            let growth_pct = previous
                .filter(|prior| *prior != 0.0)
                .map(|prior| (revenue - prior) / prior * 100.0);
            previous = Some(revenue);
            YearGrowth {
                year,
                revenue,
                growth_pct,
            }
        })
        .collect();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for status in text(df, ORDER_STATUS)?.into_iter().flatten() {
        *counts.entry(status).or_default() += 1;
    }
    let mut status_distribution: Vec<StatusCount> = counts
        .into_iter()
        .map(|(status, rows)| StatusCount { status, rows })
        .collect();
    status_distribution.sort_by(|a, b| (b.rows, &a.status).cmp(&(a.rows, &b.status)));

    Ok(SalesKpis {
        monthly_revenue,
        top_products,
        segment_territory,
        yoy_growth,
        status_distribution,
    })
}
