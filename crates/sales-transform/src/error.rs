//! Error types for the transformation stages.

use thiserror::Error;

use crate::stage::StageCondition;

/// Errors that abort a transformation run.
///
/// Row-level data-quality problems (unparseable dates, unmapped territories,
/// zero denominators) never surface here; they become nulls or flags on the
/// row. Everything in this enum is structural and stops the pipeline.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// A canonical column is absent from the table.
    #[error("{stage}: column not found: {column}")]
    ColumnNotFound { stage: &'static str, column: String },

    /// A column exists but holds the wrong kind of values.
    #[error("{stage}: column '{column}' has type {found}, expected {expected}")]
    TypeMismatch {
        stage: &'static str,
        column: String,
        expected: &'static str,
        found: String,
    },

    /// A table-wide statistic was requested over an empty table.
    #[error("{stage}: table has no rows")]
    EmptyTable { stage: &'static str },

    /// A stage ran before the stage that prepares its input.
    #[error("{stage}: requires {missing}, which no earlier stage established")]
    PreconditionNotMet {
        stage: &'static str,
        missing: StageCondition,
    },

    /// A stage was applied a second time to the same table.
    #[error("{stage}: stage has already been applied to this table")]
    StageReplayed { stage: &'static str },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
