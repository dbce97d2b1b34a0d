// =============================================================================
// Moving-average crossover detection
// =============================================================================
//
// Compares the two most recent points of a fast and a slow indicator series.
// The tie-break is deliberate: a fast value exactly equal to the slow value
// on the prior step counts as "not yet crossed", so the signal fires on the
// step that strictly crosses and ties can never fire both directions.

use super::Signal;

/// Classify a crossover between `fast` and `slow`.
///
/// Returns `Signal::None` unless both series have at least 2 trailing
/// values.  With `(pf, cf)` the previous/current fast values and `(ps, cs)`
/// the previous/current slow values:
/// - bullish  iff `pf <= ps && cf > cs`
/// - bearish  iff `pf >= ps && cf < cs`
pub fn detect_crossover(fast: &[f64], slow: &[f64]) -> Signal {
    if fast.len() < 2 || slow.len() < 2 {
        return Signal::None;
    }

    let (pf, cf) = (fast[fast.len() - 2], fast[fast.len() - 1]);
    let (ps, cs) = (slow[slow.len() - 2], slow[slow.len() - 1]);

    if pf <= ps && cf > cs {
        Signal::BullishCrossover {
            previous_fast: pf,
            previous_slow: ps,
            current_fast: cf,
            current_slow: cs,
        }
    } else if pf >= ps && cf < cs {
        Signal::BearishCrossover {
            previous_fast: pf,
            previous_slow: ps,
            current_fast: cf,
            current_slow: cs,
        }
    } else {
        Signal::None
    }
}
