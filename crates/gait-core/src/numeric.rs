//! Numeric helpers shared across crates

/// Decimal places used when reporting signal values
pub const VALUE_DECIMALS: u32 = 5;

/// Decimal places used when reporting inter-event intervals
pub const INTERVAL_DECIMALS: u32 = 4;

/// Round to a fixed number of decimals, ties to even.
///
/// Matches the half-to-even behaviour of common dataframe rounding so that
/// reports compare byte-for-byte.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / scale
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
