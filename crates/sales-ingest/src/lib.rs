//! Sales data extraction.
//!
//! Loads a raw sales extract (CSV) into a Polars DataFrame. Source files are
//! commonly exported as Latin-1, so the reader decodes them before parsing.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sales_ingest::{IngestOptions, read_sales_csv};
//!
//! let path = Path::new("data/raw/sales_data_sample.csv");
//! let df = read_sales_csv(path, &IngestOptions::default())?;
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    DEFAULT_INFER_SCHEMA_ROWS, IngestOptions, SourceEncoding, decode_source, read_sales_csv,
};
