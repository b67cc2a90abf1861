//! Per-row derived metrics.

use polars::prelude::{DataFrame, NamedFrom, Series};
use sales_model::columns::{
    DISCOUNT_PCT, HAS_INVALID_METRIC, IS_DISCOUNTED, MANUFACTURER_PRICE, NUMERIC_COLUMNS, QUANTITY,
    REVENUE_PER_ITEM, TOTAL_SALES, UNIT_PRICE,
};
use tracing::{info, warn};

use crate::data_utils::{ensure_numeric, numeric_values};
use crate::error::Result;
use crate::normalization::{checked_ratio, round_half_even};
use crate::report::TransformReport;
use crate::stage::{Stage, StageCondition};

const STAGE: &str = "derive_metrics";

/// Row counts produced by [`derive_metrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricCounts {
    pub invalid: usize,
    pub discounted: usize,
}

/// Add `revenue_per_item`, `discount_pct`, `is_discounted` and
/// `has_invalid_metric`.
///
/// A metric whose denominator is zero or null, or whose result is not finite,
/// is left null and the row's `has_invalid_metric` flag is set. Both metrics
/// are rounded to two places.
pub fn derive_metrics(df: &mut DataFrame) -> Result<MetricCounts> {
    ensure_numeric(df, &NUMERIC_COLUMNS, STAGE)?;
    let quantity = numeric_values(df, QUANTITY, STAGE)?;
    let unit_price = numeric_values(df, UNIT_PRICE, STAGE)?;
    let msrp = numeric_values(df, MANUFACTURER_PRICE, STAGE)?;
    let total_sales = numeric_values(df, TOTAL_SALES, STAGE)?;

    let height = df.height();
    let mut revenue_per_item = Vec::with_capacity(height);
    let mut discount_pct = Vec::with_capacity(height);
    let mut is_discounted = Vec::with_capacity(height);
    let mut has_invalid = Vec::with_capacity(height);
    let mut counts = MetricCounts::default();

    for idx in 0..height {
        let per_item =
            checked_ratio(total_sales[idx], quantity[idx]).map(|value| round_half_even(value, 2));
        let markdown = msrp[idx].zip(unit_price[idx]).map(|(list, paid)| list - paid);
        let discount = checked_ratio(markdown, msrp[idx])
            .map(|ratio| ratio * 100.0)
            .filter(|pct| pct.is_finite())
            .map(|pct| round_half_even(pct, 2));

        let invalid = per_item.is_none() || discount.is_none();
        let discounted = discount.is_some_and(|pct| pct > 0.0);
        counts.invalid += usize::from(invalid);
        counts.discounted += usize::from(discounted);

        revenue_per_item.push(per_item);
        discount_pct.push(discount);
        is_discounted.push(discounted);
        has_invalid.push(invalid);
    }

    df.with_column(Series::new(REVENUE_PER_ITEM.into(), revenue_per_item))?;
    df.with_column(Series::new(DISCOUNT_PCT.into(), discount_pct))?;
    df.with_column(Series::new(IS_DISCOUNTED.into(), is_discounted))?;
    df.with_column(Series::new(HAS_INVALID_METRIC.into(), has_invalid))?;

    if counts.invalid > 0 {
        warn!(
            rows = counts.invalid,
            "metrics could not be derived for some rows"
        );
    }
    info!(discounted = counts.discounted, "derived per-row metrics");
    Ok(counts)
}

pub struct DeriveMetrics;

impl Stage for DeriveMetrics {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn requires(&self) -> &'static [StageCondition] {
        &[StageCondition::CriticalValuesPresent]
    }

    fn establishes(&self) -> StageCondition {
        StageCondition::MetricsDerived
    }

    fn apply(&self, df: &mut DataFrame, report: &mut TransformReport) -> Result<()> {
        let counts = derive_metrics(df)?;
        report.invalid_metric_rows = counts.invalid;
        report.discounted_rows = counts.discounted;
        Ok(())
    }
}
