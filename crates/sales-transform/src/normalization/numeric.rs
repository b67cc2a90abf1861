//! Numeric helpers for derived metrics.

/// Round to `decimals` places, ties to even.
///
/// ```
/// use sales_transform::normalization::round_half_even;
///
/// assert_eq!(round_half_even(90.0, 2), 90.0);
/// assert_eq!(round_half_even(0.125, 2), 0.12);
/// ```
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// `numerator / denominator`, or `None` when either side is null, the
/// denominator is exactly zero, or the quotient is not finite.
pub fn checked_ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (numerator, denominator) = (numerator?, denominator?);
    if denominator == 0.0 {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}
