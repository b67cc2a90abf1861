//! Drop rows that lack a critical value.

use polars::prelude::{DataFrame, DataType, NamedFrom, Series};
use sales_model::CRITICAL_COLUMNS;
use tracing::{info, warn};

use crate::data_utils::require_column;
use crate::error::Result;
use crate::report::TransformReport;
use crate::stage::{Stage, StageCondition};

const STAGE: &str = "filter_missing";

/// Remove rows with a null (or, for float columns, NaN) value in any of
/// [`CRITICAL_COLUMNS`]. Returns the number of rows removed.
pub fn drop_incomplete_rows(df: &mut DataFrame) -> Result<usize> {
    let mut keep = vec![true; df.height()];
    for name in CRITICAL_COLUMNS {
        let column = require_column(df, name, STAGE)?;
        let missing: Vec<bool> = match column.dtype() {
            DataType::Float32 | DataType::Float64 => column
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|value| value.is_none_or(f64::is_nan))
                .collect(),
            _ => column
                .is_null()
                .into_iter()
                .map(|value| value.unwrap_or(false))
                .collect(),
        };
        for (slot, missing) in keep.iter_mut().zip(missing) {
            if missing {
                *slot = false;
            }
        }
    }

    let dropped = keep.iter().filter(|kept| !**kept).count();
    if dropped > 0 {
        let mask = Series::new("keep".into(), keep);
        *df = df.filter(mask.bool()?)?;
        warn!(dropped, "dropped rows with missing critical values");
    } else {
        info!("no rows with missing critical values");
    }
    Ok(dropped)
}

pub struct FilterMissing;

impl Stage for FilterMissing {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn requires(&self) -> &'static [StageCondition] {
        &[StageCondition::ColumnsNormalized]
    }

    fn establishes(&self) -> StageCondition {
        StageCondition::CriticalValuesPresent
    }

    fn apply(&self, df: &mut DataFrame, report: &mut TransformReport) -> Result<()> {
        report.dropped_rows = drop_incomplete_rows(df)?;
        Ok(())
    }
}
