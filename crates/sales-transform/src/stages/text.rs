//! Trim and case-normalize descriptive text.

use polars::prelude::{DataFrame, NamedFrom, Series};
use sales_model::columns::{TITLE_CASE_COLUMNS, UPPER_CASE_COLUMNS};

use crate::data_utils::text_values;
use crate::error::Result;
use crate::normalization::{standardize_title, standardize_upper};
use crate::report::TransformReport;
use crate::stage::{Stage, StageCondition};

const STAGE: &str = "standardize_text";

fn rewrite(df: &mut DataFrame, name: &str, standardize: fn(&str) -> String) -> Result<()> {
    let values: Vec<Option<String>> = text_values(df, name, STAGE)?
        .into_iter()
        .map(|value| value.map(|text| standardize(&text)))
        .collect();
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

/// Title-case names, places, product lines, deal sizes and statuses, and
/// upper-case country. Nulls stay null. Applying this twice is a no-op.
pub fn standardize_text(df: &mut DataFrame) -> Result<()> {
    for name in TITLE_CASE_COLUMNS {
        rewrite(df, name, standardize_title)?;
    }
    for name in UPPER_CASE_COLUMNS {
        rewrite(df, name, standardize_upper)?;
    }
    Ok(())
}

pub struct StandardizeText;

impl Stage for StandardizeText {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn requires(&self) -> &'static [StageCondition] {
        &[StageCondition::CriticalValuesPresent]
    }

    fn establishes(&self) -> StageCondition {
        StageCondition::TextStandardized
    }

    fn apply(&self, df: &mut DataFrame, _report: &mut TransformReport) -> Result<()> {
        standardize_text(df)
    }
}
