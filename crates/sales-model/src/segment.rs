//! Value-based customer segments.
//!
//! A customer's segment is a pure function of their lifetime value (the sum of
//! `total_sales` over all of their transactions) using three half-open bins:
//!
//! | Lifetime value       | Segment        |
//! |----------------------|----------------|
//! | `[0, 50_000)`        | `Low Value`    |
//! | `[50_000, 150_000)`  | `Medium Value` |
//! | `[150_000, ∞)`       | `High Value`   |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the medium-value bin.
pub const MEDIUM_VALUE_THRESHOLD: f64 = 50_000.0;

/// Lower bound (inclusive) of the high-value bin.
pub const HIGH_VALUE_THRESHOLD: f64 = 150_000.0;

/// Customer segment derived from lifetime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomerSegment {
    #[serde(rename = "Low Value")]
    LowValue,
    #[serde(rename = "Medium Value")]
    MediumValue,
    #[serde(rename = "High Value")]
    HighValue,
}

impl CustomerSegment {
    /// All segments in ascending value order.
    pub const ALL: [CustomerSegment; 3] = [Self::LowValue, Self::MediumValue, Self::HighValue];

    /// Buckets a lifetime value.
    ///
    /// Values below zero and NaN fall into [`CustomerSegment::LowValue`] so
    /// that every customer receives a segment.
    ///
    /// ```
    /// use sales_model::CustomerSegment;
    ///
    /// assert_eq!(CustomerSegment::from_lifetime_value(0.0), CustomerSegment::LowValue);
    /// assert_eq!(CustomerSegment::from_lifetime_value(50_000.0), CustomerSegment::MediumValue);
    /// assert_eq!(CustomerSegment::from_lifetime_value(150_000.0), CustomerSegment::HighValue);
    /// ```
    pub fn from_lifetime_value(value: f64) -> Self {
        if value >= HIGH_VALUE_THRESHOLD {
            Self::HighValue
        } else if value >= MEDIUM_VALUE_THRESHOLD {
            Self::MediumValue
        } else {
            Self::LowValue
        }
    }

    /// Returns the label written to the `customer_segment` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowValue => "Low Value",
            Self::MediumValue => "Medium Value",
            Self::HighValue => "High Value",
        }
    }
}

impl fmt::Display for CustomerSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
