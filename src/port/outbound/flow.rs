//! Trade flow port.

use chrono::{DateTime, Utc};

use crate::domain::{MarketSnapshot, TradeAlert};

/// Produces observed (or simulated) trades for the alert pipeline.
///
/// Called once per flow tick with the latest market snapshot. `None` means
/// nothing to report this tick.
pub trait TradeFlow: Send {
    fn next_alert(&mut self, markets: &[MarketSnapshot], now: DateTime<Utc>) -> Option<TradeAlert>;
}
