//! The stage abstraction and the conditions stages establish.

use std::fmt;

use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::Result;
use crate::report::TransformReport;

/// A property of the table that a stage guarantees once it has run.
///
/// Later stages list the conditions they depend on in [`Stage::requires`];
/// [`SalesFrame`](crate::SalesFrame) checks them before applying a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCondition {
    ColumnsNormalized,
    DatesParsed,
    CriticalValuesPresent,
    DatesDecomposed,
    MetricsDerived,
    AnomaliesFlagged,
    TextStandardized,
    CustomersSegmented,
    BusinessFlagsComputed,
}

impl StageCondition {
    pub fn description(&self) -> &'static str {
        match self {
            Self::ColumnsNormalized => "normalized column names",
            Self::DatesParsed => "parsed order dates",
            Self::CriticalValuesPresent => "complete critical values",
            Self::DatesDecomposed => "decomposed order dates",
            Self::MetricsDerived => "derived metrics",
            Self::AnomaliesFlagged => "anomaly flags",
            Self::TextStandardized => "standardized text",
            Self::CustomersSegmented => "customer segments",
            Self::BusinessFlagsComputed => "business flags",
        }
    }
}

impl fmt::Display for StageCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One step of the transformation.
///
/// Implementations mutate the table in place and record their counts in the
/// shared [`TransformReport`]. They do not check their own preconditions;
/// that is the job of [`SalesFrame::apply`](crate::SalesFrame::apply).
pub trait Stage {
    /// Stable identifier used in logs, errors and the report.
    fn name(&self) -> &'static str;

    /// Conditions that must already hold.
    fn requires(&self) -> &'static [StageCondition];

    /// Condition that holds after this stage has run.
    fn establishes(&self) -> StageCondition;

    fn apply(&self, df: &mut DataFrame, report: &mut TransformReport) -> Result<()>;
}
