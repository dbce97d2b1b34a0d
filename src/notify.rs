// =============================================================================
// Notification requests
// =============================================================================
//
// The core never sends anything.  When a signal fires and the caller
// configured a destination, the assembler emits one request value and the
// host performs the actual dispatch.  Message rendering is a deterministic
// template per signal kind, values rounded to two decimals.

use serde::Serialize;

use crate::signals::Signal;

/// A dispatch request for the host.  At most one per invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationRequest {
    Email { recipient: String, message: String },
    Webhook { url: String, payload: String },
}

/// Render the fixed alert sentence for a fired signal.  `None` for
/// `Signal::None`, which has nothing to say.
pub fn render_message(ticker: &str, signal: &Signal) -> Option<String> {
    let message = match *signal {
        Signal::None => return None,
        Signal::BullishCrossover {
            previous_fast,
            previous_slow,
            current_fast,
            current_slow,
        } => format!(
            "{ticker}: bullish crossover, fast average {current_fast:.2} moved above slow average {current_slow:.2} (previous {previous_fast:.2} vs {previous_slow:.2})"
        ),
        Signal::BearishCrossover {
            previous_fast,
            previous_slow,
            current_fast,
            current_slow,
        } => format!(
            "{ticker}: bearish crossover, fast average {current_fast:.2} moved below slow average {current_slow:.2} (previous {previous_fast:.2} vs {previous_slow:.2})"
        ),
        Signal::ThresholdAbove {
            previous,
            current,
            threshold,
        } => format!(
            "{ticker}: value crossed above threshold {threshold:.2}, from {previous:.2} to {current:.2}"
        ),
        Signal::ThresholdBelow {
            previous,
            current,
            threshold,
        } => format!(
            "{ticker}: value crossed below threshold {threshold:.2}, from {previous:.2} to {current:.2}"
        ),
        Signal::VolumeSpike {
            current_volume,
            average_volume,
            ratio,
        } => format!(
            "{ticker}: volume spike, current volume {current_volume:.2} is {ratio:.2}x the trailing average {average_volume:.2}"
        ),
        Signal::BandUpperBreakout { price, upper } => format!(
            "{ticker}: price {price:.2} broke above the upper Bollinger band {upper:.2}"
        ),
        Signal::BandLowerBreakout { price, lower } => format!(
            "{ticker}: price {price:.2} broke below the lower Bollinger band {lower:.2}"
        ),
    };
    Some(message)
}

/// Pick the destination and build the request.  Email wins when both a
/// recipient and a webhook URL are configured; no destination means no
/// request even for a fired signal.
pub fn build_request(
    ticker: &str,
    signal: &Signal,
    email: Option<&str>,
    webhook_url: Option<&str>,
) -> Option<NotificationRequest> {
    let message = render_message(ticker, signal)?;

    if let Some(recipient) = email {
        return Some(NotificationRequest::Email {
            recipient: recipient.to_string(),
            message,
        });
    }

    if let Some(url) = webhook_url {
        let payload = serde_json::json!({
            "ticker": ticker,
            "message": message,
            "signal": signal,
        })
        .to_string();
        return Some(NotificationRequest::Webhook {
            url: url.to_string(),
            payload,
        });
    }

    None
}
