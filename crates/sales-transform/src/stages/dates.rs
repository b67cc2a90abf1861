//! Order date parsing and calendar decomposition.

use polars::prelude::{DataFrame, NamedFrom, Series};
use sales_model::columns::{DAY, DAY_OF_WEEK, MONTH_NAME, ORDER_DATE, WEEK, YEAR_MONTH};
use tracing::warn;

use crate::data_utils::display_values;
use crate::error::Result;
use crate::normalization::{DateParts, format_order_date, parse_canonical, parse_order_date};
use crate::report::TransformReport;
use crate::stage::{Stage, StageCondition};

const PARSE_STAGE: &str = "parse_dates";
const DECOMPOSE_STAGE: &str = "decompose_dates";

/// Replace `order_date` with its canonical form.
///
/// Values no accepted layout can parse become null. Returns how many non-null
/// values were lost that way.
pub fn parse_order_dates(df: &mut DataFrame) -> Result<usize> {
    let raw = display_values(df, ORDER_DATE, PARSE_STAGE)?;
    let mut unparseable = 0;
    let parsed: Vec<Option<String>> = raw
        .iter()
        .map(|value| {
            let value = value.as_deref()?;
            let parsed = parse_order_date(value).map(|dt| format_order_date(&dt));
            if parsed.is_none() {
                unparseable += 1;
            }
            parsed
        })
        .collect();

    df.with_column(Series::new(ORDER_DATE.into(), parsed))?;
    if unparseable > 0 {
        warn!(
            unparseable,
            "order dates could not be parsed and were cleared"
        );
    }
    Ok(unparseable)
}

/// Add day, weekday name, ISO week, month name and year-month columns.
///
/// Expects `order_date` in canonical form. Rows with a null or non-canonical
/// `order_date` get nulls in every added column.
pub fn decompose_order_dates(df: &mut DataFrame) -> Result<()> {
    let dates = display_values(df, ORDER_DATE, DECOMPOSE_STAGE)?;
    let height = dates.len();
    let mut day = Vec::with_capacity(height);
    let mut day_of_week = Vec::with_capacity(height);
    let mut week = Vec::with_capacity(height);
    let mut month_name = Vec::with_capacity(height);
    let mut year_month = Vec::with_capacity(height);

    for value in &dates {
        let parts = value
            .as_deref()
            .and_then(parse_canonical)
            .map(|dt| DateParts::of(&dt));
        match parts {
            Some(parts) => {
                day.push(Some(parts.day));
                day_of_week.push(Some(parts.day_of_week));
                week.push(Some(parts.week));
                month_name.push(Some(parts.month_name));
                year_month.push(Some(parts.year_month));
            }
            None => {
                day.push(None);
                day_of_week.push(None);
                week.push(None);
                month_name.push(None);
                year_month.push(None);
            }
        }
    }

    df.with_column(Series::new(DAY.into(), day))?;
    df.with_column(Series::new(DAY_OF_WEEK.into(), day_of_week))?;
    df.with_column(Series::new(WEEK.into(), week))?;
    df.with_column(Series::new(MONTH_NAME.into(), month_name))?;
    df.with_column(Series::new(YEAR_MONTH.into(), year_month))?;
    Ok(())
}

pub struct ParseDates;

impl Stage for ParseDates {
    fn name(&self) -> &'static str {
        PARSE_STAGE
    }

    fn requires(&self) -> &'static [StageCondition] {
        &[StageCondition::ColumnsNormalized]
    }

    fn establishes(&self) -> StageCondition {
        StageCondition::DatesParsed
    }

    fn apply(&self, df: &mut DataFrame, report: &mut TransformReport) -> Result<()> {
        report.unparseable_dates = parse_order_dates(df)?;
        Ok(())
    }
}

pub struct DecomposeDates;

impl Stage for DecomposeDates {
    fn name(&self) -> &'static str {
        DECOMPOSE_STAGE
    }

    fn requires(&self) -> &'static [StageCondition] {
        &[
            StageCondition::DatesParsed,
            StageCondition::CriticalValuesPresent,
        ]
    }

    fn establishes(&self) -> StageCondition {
        StageCondition::DatesDecomposed
    }

    fn apply(&self, df: &mut DataFrame, _report: &mut TransformReport) -> Result<()> {
        decompose_order_dates(df)
    }
}
