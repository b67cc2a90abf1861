//! CLI argument definitions for the sales ETL.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sales_ingest::SourceEncoding;

#[derive(Parser)]
#[command(
    name = "sales-etl",
    version,
    about = "Sales ETL - clean, enrich and report on sales transaction extracts",
    long_about = "Extract a raw sales CSV, derive metrics, flag anomalies and segment\n\
                  customers, then write a processed dataset, a SQLite star schema\n\
                  and dated summary reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full ETL: transform, load into SQLite and export reports.
    Run(RunArgs),

    /// Transform a raw extract and write the processed CSV only.
    Transform(TransformArgs),

    /// Print KPIs for a processed dataset.
    Kpis(KpisArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Raw sales extract (CSV).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (default: <INPUT dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// SQLite database to load into (default: <output-dir>/sales.db).
    #[arg(
        long = "database",
        value_name = "PATH",
        conflicts_with = "no_database"
    )]
    pub database: Option<PathBuf>,

    /// Skip the database load.
    #[arg(long = "no-database")]
    pub no_database: bool,

    /// Skip report export.
    #[arg(long = "no-reports")]
    pub no_reports: bool,

    /// Character encoding of the extract.
    #[arg(long = "encoding", value_enum, default_value = "auto")]
    pub encoding: EncodingArg,

    /// Date stamped on the report directory, as YYYYMMDD (default: today).
    #[arg(
        long = "report-date",
        value_name = "YYYYMMDD",
        value_parser = parse_report_date
    )]
    pub report_date: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct TransformArgs {
    /// Raw sales extract (CSV).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the processed CSV.
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: PathBuf,

    /// Character encoding of the extract.
    #[arg(long = "encoding", value_enum, default_value = "auto")]
    pub encoding: EncodingArg,
}

#[derive(Parser)]
pub struct KpisArgs {
    /// Processed dataset written by `run` or `transform`.
    #[arg(value_name = "PROCESSED_CSV")]
    pub input: PathBuf,

    /// Print KPIs as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI source encoding choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    Auto,
    Utf8,
    Latin1,
}

impl From<EncodingArg> for SourceEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Auto => SourceEncoding::Auto,
            EncodingArg::Utf8 => SourceEncoding::Utf8,
            EncodingArg::Latin1 => SourceEncoding::Latin1,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_report_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .map_err(|error| format!("expected YYYYMMDD, got '{value}': {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["sales-etl", "run", "data/raw/sales.csv"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.input, PathBuf::from("data/raw/sales.csv"));
        assert!(args.output_dir.is_none());
        assert!(!args.no_database);
        assert!(matches!(args.encoding, EncodingArg::Auto));
        assert!(args.report_date.is_none());
    }

    #[test]
    fn report_date_is_parsed() {
        let args = ["sales-etl", "run", "sales.csv", "--report-date=20240315"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.report_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    }

    #[test]
    fn bad_report_date_is_rejected() {
        let args = ["sales-etl", "run", "sales.csv", "--report-date=2024-03-15"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn database_conflicts_with_no_database() {
        let args = [
            "sales-etl",
            "run",
            "sales.csv",
            "--database",
            "x.db",
            "--no-database",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
