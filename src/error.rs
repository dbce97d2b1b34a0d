// =============================================================================
// Evaluation errors
// =============================================================================
//
// The closed set of abnormal conditions the pipeline can report. Every
// variant surfaces as an `error`-status report at the output boundary; none
// of them is ever allowed to leak into a signal as NaN or infinity.
//
// Parsing problems for parameters that carry a default are NOT errors; they
// fall back to the default (see `config.rs`).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Fewer candles than the strategy's indicator windows require. Raised
    /// before the indicator runs, so a short series is never misread as
    /// "no signal".
    #[error("insufficient data: requires at least {required} candles, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A required parameter is missing or a supplied value fails validation
    /// (period < 2, fast >= slow, non-positive multiplier, a ticker with no
    /// candle data). No partial computation proceeds.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A zero divisor outside the RSI zero-loss case, which has its own
    /// defined result.
    #[error("degenerate arithmetic: {0}")]
    ArithmeticDegenerate(String),
}
