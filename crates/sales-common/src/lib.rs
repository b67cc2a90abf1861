//! Shared utilities for the sales pipeline crates.
//!
//! This crate provides the Polars `AnyValue` helpers used by ingestion,
//! transformation, persistence and reporting.

pub mod polars;

pub use polars::{
    any_to_f64, any_to_i64, any_to_string, any_to_string_opt, format_numeric, parse_f64,
};
