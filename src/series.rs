// =============================================================================
// Candle series — the input data model
// =============================================================================
//
// A `Series` is an ordered run of OHLCV candles for one ticker, oldest first.
// The host hands us candles per ticker in a `MarketData` map; everything the
// indicator library consumes (closes, volumes) is extracted from here.
//
// Candles are never mutated after construction and nothing outlives a single
// evaluation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLCV candle. `timestamp` is Unix seconds of the candle open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Candle open time as UTC, for log fields. `None` when the stamp is out
    /// of chrono's representable range.
    pub fn time_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Chronologically ordered candle series. Index 0 is the oldest candle, the
/// last index the most recent. Only constructible through `new`, which
/// enforces the ordering invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Series(Vec<Candle>);

impl Series {
    /// Build a series from host-supplied candles.
    ///
    /// The candles are stable-sorted by timestamp, so insertion order is kept
    /// for equal stamps and the non-decreasing invariant holds regardless of
    /// how the host ordered them.
    pub fn new(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.timestamp);
        Self(candles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most recent candle.
    pub fn last(&self) -> Option<&Candle> {
        self.0.last()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.0
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|c| c.close).collect()
    }

    /// Volumes, oldest first.
    pub fn volumes(&self) -> Vec<f64> {
        self.0.iter().map(|c| c.volume).collect()
    }
}

/// Ticker symbol -> candle series, as supplied by the host for one
/// invocation. A `BTreeMap` keeps iteration order deterministic.
#[derive(Debug, Clone, Default)]
pub struct MarketData(BTreeMap<String, Series>);

impl MarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: impl Into<String>, series: Series) {
        self.0.insert(ticker.into(), series);
    }

    pub fn get(&self, ticker: &str) -> Option<&Series> {
        self.0.get(ticker)
    }
}

impl FromIterator<(String, Vec<Candle>)> for MarketData {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Candle>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(ticker, candles)| (ticker, Series::new(candles)))
                .collect(),
        )
    }
}
