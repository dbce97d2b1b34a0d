// =============================================================================
// Decision Assembler — one evaluation, one auditable result
// =============================================================================
//
// The single entry point for the host: resolve the ticker and strategy from
// the call parameters, run the strategy over the ticker's series, and wrap
// the outcome in a structured report plus at most one notification request.
//
// `evaluate` never panics and never returns `Err`: every failure in the
// taxonomy becomes an `error`-status report with a human-readable message,
// and an error never carries a notification.
// =============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Params, DEFAULT_TICKER};
use crate::error::EvalError;
use crate::notify::{build_request, NotificationRequest};
use crate::series::MarketData;
use crate::signals::Signal;
use crate::strategy::{evaluate_strategy, StrategyKind, DEFAULT_STRATEGY};

// =============================================================================
// Report types
// =============================================================================

/// Everything an `ok` evaluation reports back to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRecord {
    pub ticker: String,
    pub strategy: String,
    pub signal: Signal,
    /// Snapshot of the computed indicator values behind the signal.
    pub indicators: BTreeMap<String, f64>,
    pub notification_requested: bool,
}

/// The structured result record, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EvaluationReport {
    Ok(EvaluationRecord),
    Error { message: String },
}

/// Full output of one invocation: the report plus the optional dispatch
/// request for the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub report: EvaluationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationRequest>,
}

// =============================================================================
// Entry point
// =============================================================================

/// Evaluate one strategy invocation against the host-supplied market data.
pub fn evaluate(market: &MarketData, params: &Params) -> Evaluation {
    match run(market, params) {
        Ok(evaluation) => evaluation,
        Err(err) => {
            warn!(error = %err, "evaluation failed");
            Evaluation {
                report: EvaluationReport::Error {
                    message: err.to_string(),
                },
                notification: None,
            }
        }
    }
}

fn run(market: &MarketData, params: &Params) -> Result<Evaluation, EvalError> {
    let ticker = params.string_or("ticker", DEFAULT_TICKER);

    let kind = match params.get("strategy") {
        None => DEFAULT_STRATEGY,
        Some(raw) => StrategyKind::parse(raw).unwrap_or_else(|| {
            warn!(raw, default = %DEFAULT_STRATEGY, "unknown strategy, using default");
            DEFAULT_STRATEGY
        }),
    };

    let series = market.get(&ticker).ok_or_else(|| {
        EvalError::InvalidConfiguration(format!("no candle data for ticker '{ticker}'"))
    })?;

    let outcome = evaluate_strategy(kind, series, params)?;

    let notification = build_request(
        &ticker,
        &outcome.signal,
        params.optional_string("email").as_deref(),
        params.optional_string("webhook_url").as_deref(),
    );

    if !outcome.signal.is_none() {
        let candle_time = series
            .last()
            .and_then(|c| c.time_utc())
            .map(|t| t.to_rfc3339());
        info!(
            %ticker,
            strategy = %kind,
            signal = %outcome.signal,
            candle_time = ?candle_time,
            notification = notification.is_some(),
            "signal detected"
        );
    }

    Ok(Evaluation {
        report: EvaluationReport::Ok(EvaluationRecord {
            ticker,
            strategy: kind.label().to_string(),
            signal: outcome.signal,
            indicators: outcome.indicators,
            notification_requested: notification.is_some(),
        }),
        notification,
    })
}
