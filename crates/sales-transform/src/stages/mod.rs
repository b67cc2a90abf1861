//! The standard transformation stages, in pipeline order.

pub mod anomalies;
pub mod dates;
pub mod flags;
pub mod metrics;
pub mod missing;
pub mod normalize;
pub mod segmentation;
pub mod text;

pub use anomalies::{DetectAnomalies, detect_anomalies};
pub use dates::{DecomposeDates, ParseDates, decompose_order_dates, parse_order_dates};
pub use flags::{BusinessFlags, compute_business_flags};
pub use metrics::{DeriveMetrics, derive_metrics};
pub use missing::{FilterMissing, drop_incomplete_rows};
pub use normalize::{NormalizeColumns, normalize_column_names};
pub use segmentation::{SegmentCustomers, segment_customers};
pub use text::{StandardizeText, standardize_text};
