// =============================================================================
// Threshold crossing detection
// =============================================================================
//
// Fires when a value transitions across a configured level between the
// previous and current step.  Same tie-break as the crossover detector: a
// previous value sitting exactly on the threshold has "not yet crossed", so
// a sustained above/below state never re-fires.

use super::Signal;

/// Which side of the threshold the caller is watching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    /// Parse a direction string, case-insensitively.  Unknown strings are
    /// `None` so the config layer can fall back to its default.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "above" => Some(Self::Above),
            "below" => Some(Self::Below),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Above => write!(f, "above"),
            Self::Below => write!(f, "below"),
        }
    }
}

/// Classify a threshold crossing between the previous and current value.
///
/// - `Above`: fires iff `previous <= threshold && current > threshold`
/// - `Below`: fires iff `previous >= threshold && current < threshold`
pub fn detect_threshold_crossing(
    previous: f64,
    current: f64,
    threshold: f64,
    direction: Direction,
) -> Signal {
    match direction {
        Direction::Above if previous <= threshold && current > threshold => {
            Signal::ThresholdAbove {
                previous,
                current,
                threshold,
            }
        }
        Direction::Below if previous >= threshold && current < threshold => {
            Signal::ThresholdBelow {
                previous,
                current,
                threshold,
            }
        }
        _ => Signal::None,
    }
}
