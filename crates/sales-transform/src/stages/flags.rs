//! Order-level business flags and territory regions.

use polars::prelude::{DataFrame, NamedFrom, Series};
use sales_model::columns::{
    IS_BULK_ORDER, IS_HIGH_VALUE_ORDER, QUANTITY, REGION, TERRITORY, TOTAL_SALES,
};
use sales_model::region_for;
use tracing::{info, warn};

use crate::data_utils::{display_values, numeric_values};
use crate::error::{Result, TransformError};
use crate::report::TransformReport;
use crate::stage::{Stage, StageCondition};
use crate::stats::quantile;

const STAGE: &str = "business_flags";

/// Orders at or above this quantile of `total_sales` are high-value.
pub const HIGH_VALUE_QUANTILE: f64 = 0.75;

/// Orders of at least this many units are bulk orders.
pub const BULK_ORDER_MIN_QUANTITY: f64 = 40.0;

/// Result of [`compute_business_flags`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagSummary {
    pub high_value_threshold: f64,
    pub high_value_orders: usize,
    pub bulk_orders: usize,
    pub unmapped_territories: usize,
}

/// Add `is_high_value_order`, `is_bulk_order` and `region`.
///
/// Territory codes are matched exactly; codes without a region (including
/// `LATAM`) get a null region and are counted as unmapped.
///
/// # Errors
///
/// [`TransformError::EmptyTable`] when no sales value exists to compute the
/// high-value threshold from.
pub fn compute_business_flags(df: &mut DataFrame) -> Result<FlagSummary> {
    let sales = numeric_values(df, TOTAL_SALES, STAGE)?;
    let quantity = numeric_values(df, QUANTITY, STAGE)?;
    let territory = display_values(df, TERRITORY, STAGE)?;

    let present: Vec<f64> = sales.iter().flatten().copied().collect();
    let empty = TransformError::EmptyTable { stage: STAGE };
    let threshold = quantile(&present, HIGH_VALUE_QUANTILE).ok_or(empty)?;

    let high_value: Vec<bool> = sales
        .iter()
        .map(|value| value.is_some_and(|value| value >= threshold))
        .collect();
    let bulk: Vec<bool> = quantity
        .iter()
        .map(|qty| qty.is_some_and(|qty| qty >= BULK_ORDER_MIN_QUANTITY))
        .collect();

    let mut unmapped = 0;
    let region: Vec<Option<&str>> = territory
        .iter()
        .map(|code| {
            let code = code.as_deref()?;
            let region = region_for(code);
            if region.is_none() {
                unmapped += 1;
            }
            region
        })
        .collect();

    let summary = FlagSummary {
        high_value_threshold: threshold,
        high_value_orders: high_value.iter().filter(|flag| **flag).count(),
        bulk_orders: bulk.iter().filter(|flag| **flag).count(),
        unmapped_territories: unmapped,
    };

    df.with_column(Series::new(IS_HIGH_VALUE_ORDER.into(), high_value))?;
    df.with_column(Series::new(IS_BULK_ORDER.into(), bulk))?;
    df.with_column(Series::new(REGION.into(), region))?;

    if unmapped > 0 {
        warn!(rows = unmapped, "territories without a region mapping");
    }
    info!(
        threshold,
        high_value = summary.high_value_orders,
        bulk = summary.bulk_orders,
        "computed business flags"
    );
    Ok(summary)
}

pub struct BusinessFlags;

impl Stage for BusinessFlags {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn requires(&self) -> &'static [StageCondition] {
        &[StageCondition::CriticalValuesPresent]
    }

    fn establishes(&self) -> StageCondition {
        StageCondition::BusinessFlagsComputed
    }

    fn apply(&self, df: &mut DataFrame, report: &mut TransformReport) -> Result<()> {
        let summary = compute_business_flags(df)?;
        report.high_value_threshold = Some(summary.high_value_threshold);
        report.high_value_orders = summary.high_value_orders;
        report.bulk_orders = summary.bulk_orders;
        report.unmapped_territories = summary.unmapped_territories;
        Ok(())
    }
}
