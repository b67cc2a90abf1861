//! CSV reading utilities.

mod encoding;
mod reader;

pub use encoding::{SourceEncoding, decode_source};
pub use reader::{DEFAULT_INFER_SCHEMA_ROWS, IngestOptions, read_sales_csv};
