//! CSV file reading.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::info;

use crate::error::{IngestError, Result};

use super::encoding::{SourceEncoding, decode_source};

/// Number of rows Polars inspects when inferring column types.
pub const DEFAULT_INFER_SCHEMA_ROWS: usize = 1000;

/// Options controlling how a raw extract is read.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub encoding: SourceEncoding,
    pub infer_schema_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            encoding: SourceEncoding::Auto,
            infer_schema_rows: DEFAULT_INFER_SCHEMA_ROWS,
        }
    }
}

impl IngestOptions {
    /// Set the source encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the number of rows used for schema inference.
    #[must_use]
    pub fn with_infer_schema_rows(mut self, rows: usize) -> Self {
        self.infer_schema_rows = rows.max(1);
        self
    }
}

/// Reads a sales extract into a DataFrame.
///
/// The first line is the header. Empty fields become nulls; no other
/// sentinel (such as `NA`) is treated as missing, since `NA` is a valid
/// territory code.
pub fn read_sales_csv(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    let start = Instant::now();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let text = decode_source(&bytes, options.encoding, path)?;
    if text.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(options.infer_schema_rows))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    info!(
        path = %path.display(),
        encoding = options.encoding.as_str(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "extracted sales data"
    );
    Ok(df)
}
