//! Historical growth derivation

use super::{FcfHistory, MarketDataError};

/// Minimum number of FCF observations needed to derive a growth rate
pub const MIN_HISTORY: usize = 3;

/// Growth rate used when history cannot support a CAGR
pub const FALLBACK_GROWTH: f64 = 0.05;

/// Compound annual growth rate from the oldest to the newest observation
///
/// CAGR = (last / first)^(1 / (n - 1)) - 1. Falls back to
/// [`FALLBACK_GROWTH`] when the oldest FCF is not positive or the ratio is
/// not positive, since the root is undefined there.
pub fn historical_cagr(history: &FcfHistory) -> Result<f64, MarketDataError> {
    let insufficient = MarketDataError::InsufficientHistory {
        required: MIN_HISTORY,
        found: history.len(),
    };
    if history.len() < MIN_HISTORY {
        return Err(insufficient);
    }
    let (Some(first), Some(last)) = (history.first(), history.latest()) else {
        return Err(insufficient);
    };
    let (first, last) = (first.free_cash_flow, last.free_cash_flow);

    let ratio = last / first;
    if first <= 0.0 || !ratio.is_finite() || ratio <= 0.0 {
        tracing::debug!(first, last, "FCF history does not support a CAGR, using fallback");
        return Ok(FALLBACK_GROWTH);
    }

    let periods = (history.len() - 1) as f64;
    Ok(ratio.powf(1.0 / periods) - 1.0)
}
