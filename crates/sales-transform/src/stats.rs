//! Order statistics over numeric columns.

use serde::Serialize;

/// Fence width as a multiple of the interquartile range.
pub const TUKEY_MULTIPLIER: f64 = 1.5;

/// Quantile with linear interpolation between closest ranks.
///
/// NaN values are ignored. Returns `None` when no finite-comparable value
/// remains or `q` lies outside `[0, 1]`.
///
/// ```
/// use sales_transform::quantile;
///
/// let values = [10.0, 20.0, 30.0, 40.0, 1000.0];
/// assert_eq!(quantile(&values, 0.25), Some(20.0));
/// assert_eq!(quantile(&values, 0.75), Some(40.0));
/// assert_eq!(quantile(&[], 0.5), None);
/// ```
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let rank = (sorted.len() - 1) as f64 * q;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = rank - lower as f64;
    let (low, high) = (sorted[lower], sorted[upper]);
    Some((low + (high - low) * weight).clamp(low, high))
}

/// Tukey outlier bounds derived from the first and third quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TukeyFence {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl TukeyFence {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let q1 = quantile(values, 0.25)?;
        let q3 = quantile(values, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - TUKEY_MULTIPLIER * iqr,
            upper: q3 + TUKEY_MULTIPLIER * iqr,
        })
    }

    /// Strictly outside the fence. Values on a bound are not outliers.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}
