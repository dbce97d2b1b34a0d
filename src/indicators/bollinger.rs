// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), all computed over the trailing `period`
// values.  σ is the population standard deviation (divisor = period), with
// the mean taken over that same trailing window.

use serde::Serialize;

/// Result of a Bollinger Band calculation over the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Population standard deviation of the last `period` values.
///
/// Returns `None` when `period == 0` or there are fewer than `period`
/// values.
pub fn trailing_std_dev(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let window = &values[values.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period as f64;

    Some(variance.sqrt())
}

/// Calculate Bollinger Bands for the trailing `period` values.
///
/// Returns `Some(BollingerBands)` with:
/// - `middle` = trailing SMA
/// - `upper`  = middle + `multiplier` * σ
/// - `lower`  = middle - `multiplier` * σ
///
/// Returns `None` when fewer than `period` values are available.
pub fn calculate_bollinger(
    values: &[f64],
    period: usize,
    multiplier: f64,
) -> Option<BollingerBands> {
    if period == 0 || values.len() < period {
        return None;
    }

    let window = &values[values.len() - period..];
    let middle = window.iter().sum::<f64>() / period as f64;
    let std_dev = trailing_std_dev(values, period)?;

    Some(BollingerBands {
        upper: middle + multiplier * std_dev,
        middle,
        lower: middle - multiplier * std_dev,
    })
}
