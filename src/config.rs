// =============================================================================
// Call-parameter configuration
// =============================================================================
//
// The host hands every call argument over as a string.  This module owns all
// coercion and defaulting so the calculation code never touches a raw
// parameter: absent or unparseable values fall back to their documented
// default (with a warning), while values that parse but violate validation
// (period < 2, fast >= slow, non-positive multiplier, missing required key)
// are rejected as `InvalidConfiguration` before any computation starts.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::EvalError;
use crate::signals::Direction;

// =============================================================================
// Documented defaults
// =============================================================================

pub const DEFAULT_TICKER: &str = "BTCUSDT";
pub const DEFAULT_FAST_PERIOD: usize = 9;
pub const DEFAULT_SLOW_PERIOD: usize = 21;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_RSI_DIRECTION: Direction = Direction::Above;
pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_VOLUME_PERIOD: usize = 10;
pub const DEFAULT_VOLUME_MULTIPLIER: f64 = 2.0;

/// Periods are window lengths; anything below 2 cannot express a window.
const MIN_PERIOD: usize = 2;

// =============================================================================
// Params — the raw string map
// =============================================================================

/// Flat name -> string-value call arguments, as supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.trim()).filter(|s| !s.is_empty())
    }

    /// String parameter with a default.
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Optional string parameter with no default (e.g. notification targets).
    pub fn optional_string(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    /// Real-valued parameter with a default; unparseable values fall back.
    pub fn real_or(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            None => default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(key, raw, default, "unparseable real parameter, using default");
                default
            }),
        }
    }

    /// Required real-valued parameter.  Missing or unparseable is a
    /// configuration error; there is no default to fall back to.
    pub fn required_real(&self, key: &str) -> Result<f64, EvalError> {
        let raw = self.get(key).ok_or_else(|| {
            EvalError::InvalidConfiguration(format!("required parameter '{key}' is missing"))
        })?;
        raw.parse().map_err(|_| {
            EvalError::InvalidConfiguration(format!(
                "required parameter '{key}' is not a number: '{raw}'"
            ))
        })
    }

    /// Window-length parameter with a default.  Unparseable values fall back
    /// to the default; values that parse below the minimum are rejected.
    pub fn period_or(&self, key: &str, default: usize) -> Result<usize, EvalError> {
        let period = match self.get(key) {
            None => default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(key, raw, default, "unparseable period parameter, using default");
                default
            }),
        };

        if period < MIN_PERIOD {
            return Err(EvalError::InvalidConfiguration(format!(
                "parameter '{key}' must be >= {MIN_PERIOD}, got {period}"
            )));
        }
        Ok(period)
    }

    /// Direction parameter; unknown strings fall back to the default.
    pub fn direction_or(&self, key: &str, default: Direction) -> Direction {
        match self.get(key) {
            None => default,
            Some(raw) => Direction::parse(raw).unwrap_or_else(|| {
                warn!(key, raw, %default, "unparseable direction parameter, using default");
                default
            }),
        }
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// Per-strategy typed configs — validated once, at the boundary
// =============================================================================

/// Fast/slow window pair for the SMA and EMA crossover strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverParams {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl CrossoverParams {
    pub fn from_params(params: &Params) -> Result<Self, EvalError> {
        let fast_period = params.period_or("fast_period", DEFAULT_FAST_PERIOD)?;
        let slow_period = params.period_or("slow_period", DEFAULT_SLOW_PERIOD)?;

        if fast_period >= slow_period {
            return Err(EvalError::InvalidConfiguration(format!(
                "fast_period ({fast_period}) must be shorter than slow_period ({slow_period})"
            )));
        }
        Ok(Self {
            fast_period,
            slow_period,
        })
    }
}

/// RSI threshold-crossing strategy parameters.  `threshold` is required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiParams {
    pub period: usize,
    pub threshold: f64,
    pub direction: Direction,
}

impl RsiParams {
    pub fn from_params(params: &Params) -> Result<Self, EvalError> {
        Ok(Self {
            period: params.period_or("period", DEFAULT_RSI_PERIOD)?,
            threshold: params.required_real("threshold")?,
            direction: params.direction_or("direction", DEFAULT_RSI_DIRECTION),
        })
    }
}

/// Bollinger breakout strategy parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerParams {
    pub period: usize,
    pub multiplier: f64,
}

impl BollingerParams {
    pub fn from_params(params: &Params) -> Result<Self, EvalError> {
        let period = params.period_or("period", DEFAULT_BOLLINGER_PERIOD)?;
        let multiplier = params.real_or("multiplier", DEFAULT_BOLLINGER_MULTIPLIER);
        if multiplier <= 0.0 {
            return Err(EvalError::InvalidConfiguration(format!(
                "parameter 'multiplier' must be positive, got {multiplier}"
            )));
        }
        Ok(Self { period, multiplier })
    }
}

/// Volume spike strategy parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeParams {
    pub period: usize,
    pub multiplier: f64,
}

impl VolumeParams {
    pub fn from_params(params: &Params) -> Result<Self, EvalError> {
        let period = params.period_or("period", DEFAULT_VOLUME_PERIOD)?;
        let multiplier = params.real_or("multiplier", DEFAULT_VOLUME_MULTIPLIER);
        if multiplier <= 0.0 {
            return Err(EvalError::InvalidConfiguration(format!(
                "parameter 'multiplier' must be positive, got {multiplier}"
            )));
        }
        Ok(Self { period, multiplier })
    }
}
