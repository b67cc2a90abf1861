//! Sales transaction transformation.
//!
//! Turns a raw extract into an enriched, analysis-ready table through a fixed
//! sequence of stages:
//!
//! 1. **normalize_columns**: rename source identifiers to snake_case
//! 2. **parse_dates**: parse `order_date`, unparseable values become null
//! 3. **filter_missing**: drop rows missing a critical value
//! 4. **decompose_dates**: day, weekday, ISO week, month name, year-month
//! 5. **derive_metrics**: revenue per item, discount percentage
//! 6. **detect_anomalies**: negative quantities, Tukey-fence sales outliers
//! 7. **standardize_text**: trim and case-normalize descriptive text
//! 8. **segment_customers**: lifetime value, order count, segment
//! 9. **business_flags**: high-value and bulk orders, region
//!
//! Each stage declares the [`StageCondition`]s it needs and the one it
//! establishes; [`SalesFrame`] refuses to run a stage out of order or twice.
//!
//! # Example
//!
//! ```ignore
//! use sales_transform::TransformPipeline;
//!
//! let output = TransformPipeline::standard().run(raw)?;
//! println!("{} rows kept", output.report.output_rows);
//! ```

pub mod data_utils;
pub mod error;
pub mod frame;
pub mod normalization;
pub mod pipeline;
pub mod report;
pub mod stage;
pub mod stages;
pub mod stats;

pub use error::{Result, TransformError};
pub use frame::SalesFrame;
pub use pipeline::{TransformOutput, TransformPipeline, transform};
pub use report::{StageTiming, TransformReport};
pub use stage::{Stage, StageCondition};
pub use stats::{TukeyFence, quantile};
