// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — For each window of `period` consecutive deltas:
//            avg_gain = sum(positive deltas) / period
//            avg_loss = sum(|negative deltas|) / period
// Step 3 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// A window with zero losses has effectively infinite RS; the RSI for such a
// window is 100 exactly, never a division fault.
// =============================================================================

/// Compute the RSI series for the given `closes` and `period`.
///
/// The averages are plain window means, so the returned vector has one RSI
/// value per window of `period` deltas: `max(0, closes.len() - period)`
/// values, the last one covering the most recent `period` changes.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `closes.len() < period + 1` => empty vec (need at least `period` deltas)
/// - Zero average loss in a window => RSI 100.0 for that window.
/// - Every value lies in [0, 100].
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period + 1 {
        return Vec::new();
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    deltas
        .windows(period)
        .map(|window| {
            let (sum_gain, sum_loss) = window.iter().fold((0.0_f64, 0.0_f64), |(g, l), &d| {
                if d > 0.0 {
                    (g + d, l)
                } else {
                    (g, l + d.abs())
                }
            });

            let avg_gain = sum_gain / period as f64;
            let avg_loss = sum_loss / period as f64;

            let rsi = if avg_loss == 0.0 {
                // No down moves in the window: RS is effectively infinite.
                100.0
            } else {
                let rs = avg_gain / avg_loss;
                100.0 - 100.0 / (1.0 + rs)
            };

            rsi.clamp(0.0, 100.0)
        })
        .collect()
}
