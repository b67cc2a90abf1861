//! Dated report export.
//!
//! A report is a directory `sales_report_<YYYYMMDD>` holding one CSV per
//! sheet: `Summary.csv`, `Product_Analysis.csv` and `Territory_Analysis.csv`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use crate::error::{ReportError, Result};
use crate::summary::{PivotIndex, monthly_summary, sales_pivot};

const SUMMARY_SHEET: &str = "Summary";

/// Paths written by [`export_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    pub dir: PathBuf,
    pub summary: PathBuf,
    pub product_analysis: PathBuf,
    pub territory_analysis: PathBuf,
}

impl ReportFiles {
    pub fn sheets(&self) -> [&Path; 3] {
        [
            &self.summary,
            &self.product_analysis,
            &self.territory_analysis,
        ]
    }
}

/// `sales_report_20240315` for 2024-03-15.
pub fn report_dir_name(date: NaiveDate) -> String {
    format!("sales_report_{}", date.format("%Y%m%d"))
}

fn write_sheet(mut sheet: DataFrame, dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{name}.csv"));
    let file = File::create(&path).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut sheet)?;
    Ok(path)
}

/// Write the monthly summary and both year pivots under `root`.
///
/// Existing sheets for the same date are overwritten.
pub fn export_report(df: &DataFrame, root: &Path, date: NaiveDate) -> Result<ReportFiles> {
    let dir = root.join(report_dir_name(date));
    fs::create_dir_all(&dir).map_err(|source| ReportError::Io {
        path: dir.clone(),
        source,
    })?;

    let summary = write_sheet(monthly_summary(df)?, &dir, SUMMARY_SHEET)?;
    let product_analysis = write_sheet(
        sales_pivot(df, PivotIndex::ProductLine)?,
        &dir,
        PivotIndex::ProductLine.sheet_name(),
    )?;
    let territory_analysis = write_sheet(
        sales_pivot(df, PivotIndex::Territory)?,
        &dir,
        PivotIndex::Territory.sheet_name(),
    )?;

    info!(dir = %dir.display(), "exported report");
    Ok(ReportFiles {
        dir,
        summary,
        product_analysis,
        territory_analysis,
    })
}
