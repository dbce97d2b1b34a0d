// =============================================================================
// Candlewatch — indicator and signal alert core
// =============================================================================
//
// A pure, stateless computation pipeline: an ordered candle series and a
// string parameter map go in; an indicator snapshot, a classified signal,
// and at most one notification request come out.  The host owns all I/O:
// candle supply, argument passing, and the actual email/webhook dispatch.
//
// Module layering, leaf first (nothing depends upward):
//   series -> indicators -> signals -> config/strategy -> notify/decision

pub mod config;
pub mod decision;
pub mod error;
pub mod indicators;
pub mod notify;
pub mod series;
pub mod signals;
pub mod strategy;

pub use config::Params;
pub use decision::{evaluate, Evaluation, EvaluationRecord, EvaluationReport};
pub use error::EvalError;
pub use notify::NotificationRequest;
pub use series::{Candle, MarketData, Series};
pub use signals::Signal;
pub use strategy::StrategyKind;
