//! Persistence for transformed sales tables.
//!
//! - **Processed CSV**: the full transformed table, header included
//! - **SQLite**: a small star schema (`dim_customers`, `dim_products`,
//!   `dim_dates`, `fact_transactions`), each table written from a column
//!   subset of the transformed table

mod database;
mod error;
mod processed;
pub mod schema;

pub use database::{LoadSummary, SalesDatabase, TableLoad};
pub use error::{OutputError, Result};
pub use processed::write_processed_csv;
pub use schema::{DIMENSION_TABLES, FACT_TABLE, TableSpec};
