//! Extract, transform, load and report steps.
//!
//! Each step runs in its own span and logs its duration.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use sales_ingest::{IngestOptions, SourceEncoding, read_sales_csv};
use sales_output::{LoadSummary, SalesDatabase, write_processed_csv};
use sales_report::{ReportFiles, export_report};
use sales_transform::{TransformOutput, TransformPipeline};
use tracing::{info, info_span};

use crate::types::{RunOptions, RunResult, TransformResult};

/// Directory under the output directory holding the transformed table.
pub const PROCESSED_DIR: &str = "processed";
pub const PROCESSED_FILE: &str = "sales_transformed.csv";
pub const DATABASE_FILE: &str = "sales.db";
pub const REPORTS_DIR: &str = "reports";

pub fn processed_path(output_dir: &Path) -> PathBuf {
    output_dir.join(PROCESSED_DIR).join(PROCESSED_FILE)
}

pub fn default_database_path(output_dir: &Path) -> PathBuf {
    output_dir.join(DATABASE_FILE)
}

pub fn extract(input: &Path, encoding: SourceEncoding) -> Result<DataFrame> {
    let span = info_span!("extract", path = %input.display());
    let _guard = span.enter();
    let started = Instant::now();
    let options = IngestOptions::default().with_encoding(encoding);
    let df =
        read_sales_csv(input, &options).with_context(|| format!("extract {}", input.display()))?;
    info!(
        rows = df.height(),
        duration_ms = started.elapsed().as_millis() as u64,
        "extract complete"
    );
    Ok(df)
}

/// Run the standard pipeline and write the processed CSV.
pub fn transform_to(raw: DataFrame, processed: &Path) -> Result<TransformOutput> {
    let mut output = TransformPipeline::standard()
        .run(raw)
        .context("transform sales data")?;
    let span = info_span!("write_processed", path = %processed.display());
    let _guard = span.enter();
    write_processed_csv(&mut output.data, processed)
        .with_context(|| format!("write {}", processed.display()))?;
    Ok(output)
}

pub fn load(df: &DataFrame, database: &Path) -> Result<LoadSummary> {
    let span = info_span!("load", database = %database.display());
    let _guard = span.enter();
    let started = Instant::now();
    let parent = database.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let mut db = SalesDatabase::open(database)
        .with_context(|| format!("open database {}", database.display()))?;
    let summary = db.load(df).context("load star schema")?;
    info!(
        rows = summary.total_rows(),
        duration_ms = started.elapsed().as_millis() as u64,
        "load complete"
    );
    Ok(summary)
}

pub fn report(df: &DataFrame, options: &RunOptions) -> Result<ReportFiles> {
    let span = info_span!("report");
    let _guard = span.enter();
    let started = Instant::now();
    let root = options.output_dir.join(REPORTS_DIR);
    let files = export_report(df, &root, options.report_date).context("export report")?;
    info!(
        dir = %files.dir.display(),
        duration_ms = started.elapsed().as_millis() as u64,
        "report complete"
    );
    Ok(files)
}

/// Extract, transform and write the processed CSV only.
pub fn run_transform(
    input: &Path,
    processed: &Path,
    encoding: SourceEncoding,
) -> Result<TransformResult> {
    let raw = extract(input, encoding)?;
    let output = transform_to(raw, processed)?;
    Ok(TransformResult {
        input: input.to_path_buf(),
        processed: processed.to_path_buf(),
        transform: output.report,
    })
}

/// The full ETL: extract, transform, write, then optionally load and report.
pub fn run_etl(options: &RunOptions) -> Result<RunResult> {
    let span = info_span!("etl", input = %options.input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let raw = extract(&options.input, options.encoding)?;
    let processed = processed_path(&options.output_dir);
    let output = transform_to(raw, &processed)?;

    let loaded = match &options.database {
        Some(database) => Some(load(&output.data, database)?),
        None => None,
    };
    let report_files = if options.reports {
        Some(report(&output.data, options)?)
    } else {
        None
    };

    info!(
        rows = output.data.height(),
        duration_ms = started.elapsed().as_millis() as u64,
        "etl complete"
    );
    Ok(RunResult {
        input: options.input.clone(),
        processed,
        transform: output.report,
        database: options.database.clone(),
        load: loaded,
        report_files,
    })
}
