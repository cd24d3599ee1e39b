//! Monetary rounding helpers
//!
//! Every monetary figure in the system is carried as an f64 and rounded
//! to two decimals at the boundaries; percentages are rounded to one.

/// Round to 2 decimal places (money)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place (percentages)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
