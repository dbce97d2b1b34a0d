// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators the alert
// strategies are built from.  Windowed functions return an empty `Vec` and
// single-value functions return `Option` on insufficient data, so callers
// are forced to handle the warm-up case explicitly.  Strategies pre-check
// candle counts and report the minimum required before calling in here.

pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use bollinger::{calculate_bollinger, trailing_std_dev, BollingerBands};
pub use ema::calculate_ema;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use volume::mean;
