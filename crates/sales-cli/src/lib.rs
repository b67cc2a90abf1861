//! Library components of the sales ETL command line.

pub mod logging;
pub mod pipeline;
pub mod types;
