// =============================================================================
// Candlewatch — reference host harness
// =============================================================================
//
// Reads one evaluation request from the JSON file named by the first CLI
// argument, runs the pipeline once, and prints the result as pretty JSON on
// stdout.  Request shape:
//
//   {
//     "params":  { "strategy": "volume-spike", "ticker": "BTCUSDT", ... },
//     "candles": { "BTCUSDT": [ { "timestamp": ..., "open": ..., ... } ] }
//   }
//
// Dispatching the notification request (if any) is left to whatever invokes
// this harness.
// =============================================================================

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use candlewatch::{evaluate, Candle, MarketData, Params};

#[derive(Debug, Deserialize)]
struct HostRequest {
    #[serde(default)]
    params: BTreeMap<String, String>,
    candles: BTreeMap<String, Vec<Candle>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: candlewatch <request.json>")?;

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read request from {path}"))?;
    let request: HostRequest = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse request from {path}"))?;

    let params: Params = request.params.into_iter().collect();
    let market: MarketData = request.candles.into_iter().collect();

    let evaluation = evaluate(&market, &params);

    println!(
        "{}",
        serde_json::to_string_pretty(&evaluation).context("failed to serialise evaluation")?
    );
    Ok(())
}
