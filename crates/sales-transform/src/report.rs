//! Counters collected while a table is transformed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::stats::TukeyFence;

/// Summary of one transformation run.
///
/// Every count is in rows unless the field name says otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransformReport {
    pub input_rows: usize,
    pub output_rows: usize,
    /// Source columns renamed to their canonical names.
    pub renamed_columns: usize,
    /// Rows dropped for a missing critical value.
    pub dropped_rows: usize,
    /// Non-null order dates that no accepted format could parse.
    pub unparseable_dates: usize,
    pub invalid_metric_rows: usize,
    pub discounted_rows: usize,
    pub negative_quantities: usize,
    pub sales_outliers: usize,
    pub outlier_fence: Option<TukeyFence>,
    /// 75th percentile of `total_sales`, the high-value order cutoff.
    pub high_value_threshold: Option<f64>,
    pub high_value_orders: usize,
    pub bulk_orders: usize,
    /// Non-null territory codes with no region mapping.
    pub unmapped_territories: usize,
    /// Distinct customers seen by segmentation.
    pub customers: usize,
    /// Customers per segment label.
    pub customers_by_segment: BTreeMap<String, usize>,
    pub stages: Vec<StageTiming>,
}

/// Wall-clock time and resulting height for one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTiming {
    pub name: String,
    pub rows: usize,
    pub duration_ms: f64,
}

impl TransformReport {
    /// Rows dropped by any stage.
    pub fn rows_removed(&self) -> usize {
        self.input_rows.saturating_sub(self.output_rows)
    }
}
