// =============================================================================
// Alert Strategies — the five computation pipelines
// =============================================================================
//
// Every strategy follows the same shape:
//   1. Build its typed config from the call parameters (validated once)
//   2. Pre-check the candle count against the indicator windows it needs
//   3. Extract closes/volumes and compute indicators
//   4. Run exactly one detector over the trailing points
//   5. Return the signal plus a snapshot of the computed values
//
// The pre-check happens *before* any indicator runs, so a short series is
// reported with the minimum required count instead of being silently
// truncated into a misleading "no signal".
// =============================================================================

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{BollingerParams, CrossoverParams, Params, RsiParams, VolumeParams};
use crate::error::EvalError;
use crate::indicators::{calculate_bollinger, calculate_ema, calculate_rsi, calculate_sma, mean};
use crate::series::Series;
use crate::signals::{
    detect_band_breakout, detect_crossover, detect_threshold_crossing, detect_volume_spike,
    Signal,
};

// =============================================================================
// StrategyKind
// =============================================================================

/// The closed set of strategies the engine knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    SmaCross,
    EmaCross,
    RsiThreshold,
    BollingerBreakout,
    VolumeSpike,
}

pub const DEFAULT_STRATEGY: StrategyKind = StrategyKind::SmaCross;

impl StrategyKind {
    /// Parse a strategy name, case-insensitively.  Unknown names are `None`
    /// so the caller can fall back to the default.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sma-cross" => Some(Self::SmaCross),
            "ema-cross" => Some(Self::EmaCross),
            "rsi-threshold" => Some(Self::RsiThreshold),
            "bollinger-breakout" => Some(Self::BollingerBreakout),
            "volume-spike" => Some(Self::VolumeSpike),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SmaCross => "sma-cross",
            Self::EmaCross => "ema-cross",
            Self::RsiThreshold => "rsi-threshold",
            Self::BollingerBreakout => "bollinger-breakout",
            Self::VolumeSpike => "volume-spike",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// StrategyOutcome
// =============================================================================

/// What a strategy run produced: the classified signal and a snapshot of the
/// indicator values behind it (BTreeMap so serialised output is stable).
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    pub signal: Signal,
    pub indicators: BTreeMap<String, f64>,
}

/// Run `kind` over `series` with the given call parameters.
pub fn evaluate_strategy(
    kind: StrategyKind,
    series: &Series,
    params: &Params,
) -> Result<StrategyOutcome, EvalError> {
    match kind {
        StrategyKind::SmaCross => evaluate_sma_cross(series, params),
        StrategyKind::EmaCross => evaluate_ema_cross(series, params),
        StrategyKind::RsiThreshold => evaluate_rsi_threshold(series, params),
        StrategyKind::BollingerBreakout => evaluate_bollinger_breakout(series, params),
        StrategyKind::VolumeSpike => evaluate_volume_spike(series, params),
    }
}

// =============================================================================
// Shared checks
// =============================================================================

fn ensure_candles(series: &Series, required: usize) -> Result<(), EvalError> {
    if series.len() < required {
        return Err(EvalError::InsufficientData {
            required,
            actual: series.len(),
        });
    }
    Ok(())
}

/// Host data can contain NaN; nothing non-finite may reach the output.
fn ensure_finite(indicators: &BTreeMap<String, f64>) -> Result<(), EvalError> {
    for (name, value) in indicators {
        if !value.is_finite() {
            return Err(EvalError::ArithmeticDegenerate(format!(
                "indicator '{name}' is not finite"
            )));
        }
    }
    Ok(())
}

fn outcome(
    signal: Signal,
    indicators: BTreeMap<String, f64>,
) -> Result<StrategyOutcome, EvalError> {
    ensure_finite(&indicators)?;
    Ok(StrategyOutcome { signal, indicators })
}

// =============================================================================
// The five strategies
// =============================================================================

fn evaluate_sma_cross(series: &Series, params: &Params) -> Result<StrategyOutcome, EvalError> {
    let cfg = CrossoverParams::from_params(params)?;
    // The slow SMA must produce at least one value; with exactly one the
    // detector classifies `none` (no prior step to transition from).
    ensure_candles(series, cfg.slow_period)?;

    let closes = series.closes();
    let fast = calculate_sma(&closes, cfg.fast_period);
    let slow = calculate_sma(&closes, cfg.slow_period);
    let signal = detect_crossover(&fast, &slow);

    debug!(
        fast_period = cfg.fast_period,
        slow_period = cfg.slow_period,
        fast = ?fast.last(),
        slow = ?slow.last(),
        %signal,
        "sma-cross evaluated"
    );

    let mut indicators = BTreeMap::new();
    indicators.insert("fast_sma".to_string(), *fast.last().unwrap());
    indicators.insert("slow_sma".to_string(), *slow.last().unwrap());
    outcome(signal, indicators)
}

fn evaluate_ema_cross(series: &Series, params: &Params) -> Result<StrategyOutcome, EvalError> {
    let cfg = CrossoverParams::from_params(params)?;
    // EMA degrades gracefully below its period; the detector still needs two
    // trailing points per side.
    ensure_candles(series, 2)?;

    let closes = series.closes();
    let fast = calculate_ema(&closes, cfg.fast_period);
    let slow = calculate_ema(&closes, cfg.slow_period);
    let signal = detect_crossover(&fast, &slow);

    debug!(
        fast_period = cfg.fast_period,
        slow_period = cfg.slow_period,
        fast = ?fast.last(),
        slow = ?slow.last(),
        %signal,
        "ema-cross evaluated"
    );

    let mut indicators = BTreeMap::new();
    indicators.insert("fast_ema".to_string(), *fast.last().unwrap());
    indicators.insert("slow_ema".to_string(), *slow.last().unwrap());
    outcome(signal, indicators)
}

fn evaluate_rsi_threshold(series: &Series, params: &Params) -> Result<StrategyOutcome, EvalError> {
    let cfg = RsiParams::from_params(params)?;
    // Two consecutive RSI values: period+1 closes for the first window plus
    // one more delta for the transition.
    ensure_candles(series, cfg.period + 2)?;

    let closes = series.closes();
    let rsi = calculate_rsi(&closes, cfg.period);
    let current = rsi[rsi.len() - 1];
    let previous = rsi[rsi.len() - 2];
    let signal = detect_threshold_crossing(previous, current, cfg.threshold, cfg.direction);

    debug!(
        period = cfg.period,
        threshold = cfg.threshold,
        direction = %cfg.direction,
        previous,
        current,
        %signal,
        "rsi-threshold evaluated"
    );

    let mut indicators = BTreeMap::new();
    indicators.insert("rsi".to_string(), current);
    indicators.insert("previous_rsi".to_string(), previous);
    outcome(signal, indicators)
}

fn evaluate_bollinger_breakout(
    series: &Series,
    params: &Params,
) -> Result<StrategyOutcome, EvalError> {
    let cfg = BollingerParams::from_params(params)?;
    ensure_candles(series, cfg.period)?;

    let closes = series.closes();
    let bands = calculate_bollinger(&closes, cfg.period, cfg.multiplier).ok_or(
        EvalError::InsufficientData {
            required: cfg.period,
            actual: series.len(),
        },
    )?;
    let price = *closes.last().unwrap();
    let signal = detect_band_breakout(price, &bands);

    debug!(
        period = cfg.period,
        multiplier = cfg.multiplier,
        price,
        upper = bands.upper,
        lower = bands.lower,
        %signal,
        "bollinger-breakout evaluated"
    );

    let mut indicators = BTreeMap::new();
    indicators.insert("price".to_string(), price);
    indicators.insert("upper_band".to_string(), bands.upper);
    indicators.insert("middle_band".to_string(), bands.middle);
    indicators.insert("lower_band".to_string(), bands.lower);
    outcome(signal, indicators)
}

fn evaluate_volume_spike(series: &Series, params: &Params) -> Result<StrategyOutcome, EvalError> {
    let cfg = VolumeParams::from_params(params)?;
    // Trailing window of `period` historical candles plus the current one.
    ensure_candles(series, cfg.period + 1)?;

    let volumes = series.volumes();
    let (current, history) = volumes.split_last().unwrap();
    let window = &history[history.len() - cfg.period..];
    let average = mean(window).ok_or(EvalError::InsufficientData {
        required: cfg.period + 1,
        actual: series.len(),
    })?;

    if average == 0.0 {
        return Err(EvalError::ArithmeticDegenerate(
            "average volume over the trailing window is zero".to_string(),
        ));
    }

    let signal = detect_volume_spike(*current, average, cfg.multiplier);

    debug!(
        period = cfg.period,
        multiplier = cfg.multiplier,
        current_volume = *current,
        average_volume = average,
        %signal,
        "volume-spike evaluated"
    );

    let mut indicators = BTreeMap::new();
    indicators.insert("current_volume".to_string(), *current);
    indicators.insert("average_volume".to_string(), average);
    outcome(signal, indicators)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Candle;

    fn series_from_closes(closes: &[f64]) -> Series {
        Series::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| Candle {
                    timestamp: 60 * i as i64,
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 100.0,
                })
                .collect(),
        )
    }

    fn series_from_volumes(volumes: &[f64]) -> Series {
        Series::new(
            volumes
                .iter()
                .enumerate()
                .map(|(i, &volume)| Candle {
                    timestamp: 60 * i as i64,
                    open: 10.0,
                    high: 10.0,
                    low: 10.0,
                    close: 10.0,
                    volume,
                })
                .collect(),
        )
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ---- strategy kind ---------------------------------------------------

    #[test]
    fn strategy_kind_parse() {
        assert_eq!(StrategyKind::parse("sma-cross"), Some(StrategyKind::SmaCross));
        assert_eq!(
            StrategyKind::parse(" Volume-Spike "),
            Some(StrategyKind::VolumeSpike)
        );
        assert_eq!(StrategyKind::parse("martingale"), None);
    }

    #[test]
    fn strategy_kind_labels_roundtrip() {
        for kind in [
            StrategyKind::SmaCross,
            StrategyKind::EmaCross,
            StrategyKind::RsiThreshold,
            StrategyKind::BollingerBreakout,
            StrategyKind::VolumeSpike,
        ] {
            assert_eq!(StrategyKind::parse(kind.label()), Some(kind));
        }
    }

    // ---- sma-cross -------------------------------------------------------

    #[test]
    fn sma_cross_fires_on_v_shaped_recovery() {
        // Decline then sharp recovery: the 3-period SMA overtakes the
        // 5-period SMA exactly on the last step.
        let series = series_from_closes(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 8.0, 12.0]);
        let p = params(&[("fast_period", "3"), ("slow_period", "5")]);
        let outcome = evaluate_strategy(StrategyKind::SmaCross, &series, &p).unwrap();
        assert_eq!(outcome.signal.kind(), "bullish-crossover");
        assert!((outcome.indicators["fast_sma"] - 8.0).abs() < 1e-10);
        assert!((outcome.indicators["slow_sma"] - 7.0).abs() < 1e-10);
    }

    #[test]
    fn sma_cross_none_on_step_before_the_transition() {
        // One candle earlier the fast SMA is still below: no signal yet.
        let series = series_from_closes(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 8.0]);
        let p = params(&[("fast_period", "3"), ("slow_period", "5")]);
        let outcome = evaluate_strategy(StrategyKind::SmaCross, &series, &p).unwrap();
        assert!(outcome.signal.is_none());
    }

    #[test]
    fn sma_cross_monotonic_ramp_has_no_transition() {
        // On a pure ramp the fast SMA is above the slow SMA from the first
        // overlapping step, so there is never a one-step transition.
        let series = series_from_closes(&(1..=10).map(|x| x as f64).collect::<Vec<_>>());
        let p = params(&[("fast_period", "3"), ("slow_period", "5")]);
        let outcome = evaluate_strategy(StrategyKind::SmaCross, &series, &p).unwrap();
        assert!(outcome.signal.is_none());
    }

    #[test]
    fn sma_cross_insufficient_data_names_minimum() {
        // Scenario: 5 candles against a 20-period window.
        let series = series_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let p = params(&[("slow_period", "20")]);
        let err = evaluate_strategy(StrategyKind::SmaCross, &series, &p).unwrap_err();
        assert_eq!(
            err,
            EvalError::InsufficientData {
                required: 20,
                actual: 5
            }
        );
        assert!(err.to_string().contains("at least 20 candles"));
    }

    #[test]
    fn sma_cross_exactly_slow_period_candles_is_none_not_error() {
        // One slow value exists: computable, but no prior step to cross from.
        let series = series_from_closes(&[10.0, 9.0, 8.0, 7.0, 12.0]);
        let p = params(&[("fast_period", "3"), ("slow_period", "5")]);
        let outcome = evaluate_strategy(StrategyKind::SmaCross, &series, &p).unwrap();
        assert!(outcome.signal.is_none());
    }

    // ---- ema-cross -------------------------------------------------------

    #[test]
    fn ema_cross_fires_on_recovery() {
        let series = series_from_closes(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 9.0, 14.0]);
        let p = params(&[("fast_period", "3"), ("slow_period", "9")]);
        let outcome = evaluate_strategy(StrategyKind::EmaCross, &series, &p).unwrap();
        assert_eq!(outcome.signal.kind(), "bullish-crossover");
    }

    #[test]
    fn ema_cross_single_candle_is_insufficient() {
        let series = series_from_closes(&[10.0]);
        let p = params(&[]);
        let err = evaluate_strategy(StrategyKind::EmaCross, &series, &p).unwrap_err();
        assert_eq!(
            err,
            EvalError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }

    // ---- rsi-threshold ---------------------------------------------------

    #[test]
    fn rsi_threshold_fires_on_upward_cross() {
        // Mostly flat window keeps RSI mid-range, then a strong rally pushes
        // it through 70 on the final step.
        let mut closes = vec![
            100.0, 99.0, 100.0, 99.0, 100.0, 99.0, 100.0, 99.0, 100.0, 99.0, 100.0, 99.0,
        ];
        closes.extend([100.5, 101.0, 103.0, 108.0]);
        let series = series_from_closes(&closes);
        let p = params(&[("period", "8"), ("threshold", "70"), ("direction", "above")]);
        let outcome = evaluate_strategy(StrategyKind::RsiThreshold, &series, &p).unwrap();
        assert_eq!(outcome.signal.kind(), "threshold-above");
        assert!(outcome.indicators["rsi"] > 70.0);
        assert!(outcome.indicators["previous_rsi"] <= 70.0);
    }

    #[test]
    fn rsi_threshold_missing_threshold_is_invalid() {
        let series = series_from_closes(&(1..=30).map(|x| x as f64).collect::<Vec<_>>());
        let err = evaluate_strategy(StrategyKind::RsiThreshold, &series, &params(&[])).unwrap_err();
        assert!(matches!(err, EvalError::InvalidConfiguration(_)));
    }

    #[test]
    fn rsi_threshold_sustained_overbought_does_not_refire() {
        // Monotonic ramp: RSI is pinned at 100 on both steps, so there is no
        // transition through the threshold.
        let series = series_from_closes(&(1..=30).map(|x| x as f64).collect::<Vec<_>>());
        let p = params(&[("threshold", "70")]);
        let outcome = evaluate_strategy(StrategyKind::RsiThreshold, &series, &p).unwrap();
        assert!(outcome.signal.is_none());
        assert_eq!(outcome.indicators["rsi"], 100.0);
    }

    #[test]
    fn rsi_threshold_insufficient_data() {
        let series = series_from_closes(&(1..=15).map(|x| x as f64).collect::<Vec<_>>());
        let p = params(&[("threshold", "70")]);
        let err = evaluate_strategy(StrategyKind::RsiThreshold, &series, &p).unwrap_err();
        assert_eq!(
            err,
            EvalError::InsufficientData {
                required: 16,
                actual: 15
            }
        );
    }

    // ---- bollinger-breakout ----------------------------------------------

    #[test]
    fn bollinger_breakout_fires_above_upper_band() {
        // 19 quiet closes around 100, then a violent move to 110.
        let mut closes = vec![
            100.0, 100.5, 99.5, 100.0, 100.5, 99.5, 100.0, 100.5, 99.5, 100.0, 100.5, 99.5,
            100.0, 100.5, 99.5, 100.0, 100.5, 99.5, 100.0,
        ];
        closes.push(110.0);
        let series = series_from_closes(&closes);
        let p = params(&[("period", "20"), ("multiplier", "2.0")]);
        let outcome = evaluate_strategy(StrategyKind::BollingerBreakout, &series, &p).unwrap();
        assert_eq!(outcome.signal.kind(), "band-upper-breakout");
        assert!(outcome.indicators["price"] > outcome.indicators["upper_band"]);
    }

    #[test]
    fn bollinger_flat_series_touching_band_is_none() {
        // Flat input collapses the bands onto the price; touching is not a
        // breakout.
        let series = series_from_closes(&vec![100.0; 20]);
        let outcome =
            evaluate_strategy(StrategyKind::BollingerBreakout, &series, &params(&[])).unwrap();
        assert!(outcome.signal.is_none());
    }

    #[test]
    fn bollinger_insufficient_data() {
        let series = series_from_closes(&[1.0, 2.0, 3.0]);
        let err = evaluate_strategy(StrategyKind::BollingerBreakout, &series, &params(&[]))
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::InsufficientData {
                required: 20,
                actual: 3
            }
        );
    }

    // ---- volume-spike ----------------------------------------------------

    #[test]
    fn volume_spike_fires_at_three_times_average() {
        // Scenario: current 300 vs trailing 10-period average 100 with
        // multiplier 2.0.
        let mut volumes = vec![100.0; 10];
        volumes.push(300.0);
        let series = series_from_volumes(&volumes);
        let p = params(&[("period", "10"), ("multiplier", "2.0")]);
        let outcome = evaluate_strategy(StrategyKind::VolumeSpike, &series, &p).unwrap();
        match outcome.signal {
            Signal::VolumeSpike { ratio, .. } => assert!((ratio - 3.0).abs() < 1e-10),
            other => panic!("expected volume spike, got {other}"),
        }
        assert!((outcome.indicators["average_volume"] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn volume_spike_excludes_current_candle_from_average() {
        // If the current candle leaked into the window the average would be
        // inflated and the ratio would drop below the multiplier.
        let mut volumes = vec![50.0; 10];
        volumes.push(100.0);
        let series = series_from_volumes(&volumes);
        let p = params(&[("period", "10"), ("multiplier", "2.0")]);
        let outcome = evaluate_strategy(StrategyKind::VolumeSpike, &series, &p).unwrap();
        assert_eq!(outcome.signal.kind(), "volume-spike");
    }

    #[test]
    fn volume_spike_zero_average_is_degenerate() {
        let mut volumes = vec![0.0; 10];
        volumes.push(300.0);
        let series = series_from_volumes(&volumes);
        let err =
            evaluate_strategy(StrategyKind::VolumeSpike, &series, &params(&[])).unwrap_err();
        assert!(matches!(err, EvalError::ArithmeticDegenerate(_)));
    }

    #[test]
    fn volume_spike_insufficient_data() {
        let series = series_from_volumes(&[100.0; 10]);
        let err =
            evaluate_strategy(StrategyKind::VolumeSpike, &series, &params(&[])).unwrap_err();
        assert_eq!(
            err,
            EvalError::InsufficientData {
                required: 11,
                actual: 10
            }
        );
    }

    // ---- cross-cutting ---------------------------------------------------

    #[test]
    fn nan_close_is_reported_as_degenerate() {
        let mut closes: Vec<f64> = (1..=9).map(|x| x as f64).collect();
        closes[8] = f64::NAN;
        let series = series_from_closes(&closes);
        let p = params(&[("fast_period", "3"), ("slow_period", "5")]);
        let err = evaluate_strategy(StrategyKind::SmaCross, &series, &p).unwrap_err();
        assert!(matches!(err, EvalError::ArithmeticDegenerate(_)));
    }
}
