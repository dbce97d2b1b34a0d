// =============================================================================
// Signals Module
// =============================================================================
//
// Discrete signal classification for the alert engine:
// - Moving-average crossover (bullish / bearish)
// - Threshold crossing (above / below)
// - Volume spike vs trailing average
// - Bollinger band breakout (upper / lower)
//
// Detectors are stateless and look at the two most recent points only: a
// signal fires exactly on a one-step transition, never on a sustained state.

pub mod band_breakout;
pub mod crossover;
pub mod threshold;
pub mod volume_spike;

pub use band_breakout::detect_band_breakout;
pub use crossover::detect_crossover;
pub use threshold::{detect_threshold_crossing, Direction};
pub use volume_spike::detect_volume_spike;

use serde::Serialize;

/// The classification a detector produced, with the numeric evidence that
/// produced it.  Exactly one signal (or `None`) per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Signal {
    None,
    BullishCrossover {
        previous_fast: f64,
        previous_slow: f64,
        current_fast: f64,
        current_slow: f64,
    },
    BearishCrossover {
        previous_fast: f64,
        previous_slow: f64,
        current_fast: f64,
        current_slow: f64,
    },
    ThresholdAbove {
        previous: f64,
        current: f64,
        threshold: f64,
    },
    ThresholdBelow {
        previous: f64,
        current: f64,
        threshold: f64,
    },
    VolumeSpike {
        current_volume: f64,
        average_volume: f64,
        ratio: f64,
    },
    BandUpperBreakout {
        price: f64,
        upper: f64,
    },
    BandLowerBreakout {
        price: f64,
        lower: f64,
    },
}

impl Signal {
    /// Stable kebab-case label for this signal kind, matching the serialised
    /// `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BullishCrossover { .. } => "bullish-crossover",
            Self::BearishCrossover { .. } => "bearish-crossover",
            Self::ThresholdAbove { .. } => "threshold-above",
            Self::ThresholdBelow { .. } => "threshold-below",
            Self::VolumeSpike { .. } => "volume-spike",
            Self::BandUpperBreakout { .. } => "band-upper-breakout",
            Self::BandLowerBreakout { .. } => "band-lower-breakout",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}
