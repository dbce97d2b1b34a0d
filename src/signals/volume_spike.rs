// =============================================================================
// Volume spike detection
// =============================================================================
//
// Compares the current candle's volume against the mean of a trailing window
// of historical volumes (excluding the current candle).  The strategy layer
// owns the window extraction and reports a zero or missing average before
// calling in here.

use super::Signal;

/// Classify a volume spike.
///
/// Fires iff `current_volume / average_volume >= multiplier`.  The caller
/// guarantees a positive, finite `average_volume`; a non-positive average is
/// classified as `None` rather than producing a meaningless ratio.
pub fn detect_volume_spike(current_volume: f64, average_volume: f64, multiplier: f64) -> Signal {
    if average_volume <= 0.0 || !average_volume.is_finite() {
        return Signal::None;
    }

    let ratio = current_volume / average_volume;
    if ratio >= multiplier {
        Signal::VolumeSpike {
            current_volume,
            average_volume,
            ratio,
        }
    } else {
        Signal::None
    }
}
