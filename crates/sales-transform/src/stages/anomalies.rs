//! Negative quantity and sales outlier flags.

use polars::prelude::{DataFrame, NamedFrom, Series};
use sales_model::columns::{IS_NEGATIVE_QTY, IS_SALES_OUTLIER, QUANTITY, TOTAL_SALES};
use tracing::info;

use crate::data_utils::numeric_values;
use crate::error::{Result, TransformError};
use crate::report::TransformReport;
use crate::stage::{Stage, StageCondition};
use crate::stats::TukeyFence;

const STAGE: &str = "detect_anomalies";

/// Result of [`detect_anomalies`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalySummary {
    pub negative_quantities: usize,
    pub outliers: usize,
    pub fence: TukeyFence,
}

/// Add `is_negative_qty` and `is_sales_outlier`.
///
/// The outlier fence is computed over every non-null `total_sales` value in
/// the table, so flags depend on the whole table rather than the row alone.
///
/// # Errors
///
/// [`TransformError::EmptyTable`] when there is no sales value to compute
/// quartiles from.
pub fn detect_anomalies(df: &mut DataFrame) -> Result<AnomalySummary> {
    let quantity = numeric_values(df, QUANTITY, STAGE)?;
    let total_sales = numeric_values(df, TOTAL_SALES, STAGE)?;

    let present: Vec<f64> = total_sales.iter().flatten().copied().collect();
    let fence =
        TukeyFence::from_values(&present).ok_or(TransformError::EmptyTable { stage: STAGE })?;

    let negative: Vec<bool> = quantity
        .iter()
        .map(|qty| qty.is_some_and(|qty| qty < 0.0))
        .collect();
    let outlier: Vec<bool> = total_sales
        .iter()
        .map(|sales| sales.is_some_and(|sales| fence.is_outlier(sales)))
        .collect();

    let summary = AnomalySummary {
        negative_quantities: negative.iter().filter(|flag| **flag).count(),
        outliers: outlier.iter().filter(|flag| **flag).count(),
        fence,
    };

    df.with_column(Series::new(IS_NEGATIVE_QTY.into(), negative))?;
    df.with_column(Series::new(IS_SALES_OUTLIER.into(), outlier))?;

    info!(
        q1 = fence.q1,
        q3 = fence.q3,
        lower = fence.lower,
        upper = fence.upper,
        outliers = summary.outliers,
        negative_quantities = summary.negative_quantities,
        "flagged anomalies"
    );
    Ok(summary)
}

pub struct DetectAnomalies;

impl Stage for DetectAnomalies {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn requires(&self) -> &'static [StageCondition] {
        &[StageCondition::CriticalValuesPresent]
    }

    fn establishes(&self) -> StageCondition {
        StageCondition::AnomaliesFlagged
    }

    fn apply(&self, df: &mut DataFrame, report: &mut TransformReport) -> Result<()> {
        let summary = detect_anomalies(df)?;
        report.negative_quantities = summary.negative_quantities;
        report.sales_outliers = summary.outliers;
        report.outlier_fence = Some(summary.fence);
        Ok(())
    }
}
