// =============================================================================
// Volume helpers
// =============================================================================
//
// The volume-spike strategy compares the current candle's volume against the
// arithmetic mean of a trailing window of historical volumes.  The quotient
// itself is taken at the strategy layer, where a zero average can be
// reported as degenerate arithmetic instead of silently becoming infinity.

/// Arithmetic mean of `values`.
///
/// Returns `None` for an empty sample set or a non-finite result.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let avg = values.iter().sum::<f64>() / values.len() as f64;
    if avg.is_finite() {
        Some(avg)
    } else {
        None
    }
}
