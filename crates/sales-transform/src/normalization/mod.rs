//! Value-level normalization used by the stages.

pub mod datetime;
pub mod numeric;
pub mod text;

pub use datetime::{
    CANONICAL_DATETIME_FORMAT, DateParts, format_order_date, parse_canonical, parse_order_date,
};
pub use numeric::{checked_ratio, round_half_even};
pub use text::{standardize_title, standardize_upper, title_case};
