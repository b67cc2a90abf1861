//! Sales transaction data model.
//!
//! - **columns**: canonical column names and the source rename table
//! - **segment**: value-based customer segments
//! - **territory**: sales territory codes and their region names

pub mod columns;
pub mod segment;
pub mod territory;

pub use columns::{CRITICAL_COLUMNS, SOURCE_COLUMN_MAP, canonical_name};
pub use segment::CustomerSegment;
pub use territory::{Territory, region_for};
