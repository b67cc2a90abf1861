//! Rename source columns to canonical snake_case names.

use polars::prelude::DataFrame;
use sales_model::canonical_name;
use tracing::debug;

use crate::error::Result;
use crate::report::TransformReport;
use crate::stage::{Stage, StageCondition};

/// Rename every column that appears in the source rename table.
///
/// Unknown columns pass through untouched and absent ones are not an error;
/// a stage that needs a missing column reports it when it reads it.
/// Returns the number of columns renamed.
pub fn normalize_column_names(df: &mut DataFrame) -> Result<usize> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut renamed = 0;
    for name in &present {
        if let Some(target) = canonical_name(name) {
            df.rename(name, target.into())?;
            debug!(from = %name, to = target, "renamed column");
            renamed += 1;
        }
    }
    Ok(renamed)
}

pub struct NormalizeColumns;

impl Stage for NormalizeColumns {
    fn name(&self) -> &'static str {
        "normalize_columns"
    }

    fn requires(&self) -> &'static [StageCondition] {
        &[]
    }

    fn establishes(&self) -> StageCondition {
        StageCondition::ColumnsNormalized
    }

    fn apply(&self, df: &mut DataFrame, report: &mut TransformReport) -> Result<()> {
        report.renamed_columns = normalize_column_names(df)?;
        Ok(())
    }
}
