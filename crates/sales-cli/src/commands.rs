use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use sales_cli::pipeline::{default_database_path, run_etl, run_transform};
use sales_cli::types::{RunOptions, RunResult, TransformResult};
use sales_ingest::{IngestOptions, read_sales_csv};
use sales_report::{SalesKpis, compute_kpis};
use tracing::info_span;

use crate::cli::{KpisArgs, RunArgs, TransformArgs};

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .join("output")
}

pub fn run_etl_command(args: &RunArgs) -> Result<RunResult> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    let database = if args.no_database {
        None
    } else {
        Some(
            args.database
                .clone()
                .unwrap_or_else(|| default_database_path(&output_dir)),
        )
    };
    let options = RunOptions {
        input: args.input.clone(),
        output_dir,
        database,
        reports: !args.no_reports,
        encoding: args.encoding.into(),
        report_date: args
            .report_date
            .unwrap_or_else(|| Local::now().date_naive()),
    };
    run_etl(&options)
}

pub fn run_transform_command(args: &TransformArgs) -> Result<TransformResult> {
    run_transform(&args.input, &args.output, args.encoding.into())
}

pub fn run_kpis(args: &KpisArgs) -> Result<SalesKpis> {
    let span = info_span!("kpis", path = %args.input.display());
    let _guard = span.enter();
    let df = read_sales_csv(&args.input, &IngestOptions::default())
        .with_context(|| format!("read {}", args.input.display()))?;
    compute_kpis(&df).context("compute KPIs")
}
