use std::path::PathBuf;

use chrono::NaiveDate;
use sales_ingest::SourceEncoding;
use sales_output::LoadSummary;
use sales_report::ReportFiles;
use sales_transform::TransformReport;

/// Resolved settings for one `run` invocation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// SQLite file to load into; `None` skips the load.
    pub database: Option<PathBuf>,
    pub reports: bool,
    pub encoding: SourceEncoding,
    pub report_date: NaiveDate,
}

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub processed: PathBuf,
    pub transform: TransformReport,
    pub database: Option<PathBuf>,
    pub load: Option<LoadSummary>,
    pub report_files: Option<ReportFiles>,
}

#[derive(Debug)]
pub struct TransformResult {
    pub input: PathBuf,
    pub processed: PathBuf,
    pub transform: TransformReport,
}
