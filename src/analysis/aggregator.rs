//! Shared aggregation helpers.
//!
//! Every derived value in a summary is a quotient of two running totals.
//! The denominator is routinely zero (empty folders, no interesting
//! methods), in which case the quotient is reported as zero.

/// `numerator / denominator`, or `0.0` when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Guarded ratio scaled to a percentage.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator) * 100.0
}
