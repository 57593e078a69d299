//! Port implementations with scripted behavior.
//!
//! - [`ScriptedMarketSource`] - Pops one scripted batch per fetch.
//! - [`StaticPriceFeed`] - Fixed prices, or a fixed failure.
//! - [`ScriptedFlow`] - Yields queued alerts regardless of the markets.
//! - [`RecordingNotifier`] - Captures every delivered alert.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::domain::{CryptoPrice, MarketSnapshot, TradeAlert};
use crate::error::{Error, Result};
use crate::port::{AlertNotifier, MarketSource, PriceFeed, TradeFlow};

// ---------------------------------------------------------------------------
// ScriptedMarketSource
// ---------------------------------------------------------------------------

/// Market source returning pre-loaded batches in order.
///
/// Each `fetch_markets` pops the next batch; once the script is exhausted the
/// last batch repeats. A `None` entry fails that fetch with a connection
/// error.
pub struct ScriptedMarketSource {
    batches: Mutex<VecDeque<Option<Vec<MarketSnapshot>>>>,
    last: Mutex<Vec<MarketSnapshot>>,
    fetch_count: Arc<AtomicU32>,
}

impl ScriptedMarketSource {
    pub fn new(batches: Vec<Option<Vec<MarketSnapshot>>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            last: Mutex::new(Vec::new()),
            fetch_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Always return `markets`.
    pub fn fixed(markets: Vec<MarketSnapshot>) -> Self {
        Self::new(vec![Some(markets)])
    }

    /// Always fail.
    pub fn failing() -> Self {
        Self::new(vec![None])
    }

    pub fn fetch_count(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.fetch_count)
    }
}

#[async_trait]
impl MarketSource for ScriptedMarketSource {
    async fn fetch_markets(&self, limit: usize) -> Result<Vec<MarketSnapshot>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let next = {
            let mut batches = self.batches.lock();
            if batches.len() > 1 {
                batches.pop_front()
            } else {
                batches.front().cloned()
            }
        };
        match next {
            Some(Some(mut markets)) => {
                markets.truncate(limit);
                *self.last.lock() = markets.clone();
                Ok(markets)
            }
            Some(None) => Err(Error::Connection("scripted failure".to_string())),
            None => Ok(self.last.lock().clone()),
        }
    }

    async fn fetch_market_by_slug(&self, slug: &str) -> Result<Option<MarketSnapshot>> {
        let last = self.last.lock().clone();
        let pending = self
            .batches
            .lock()
            .front()
            .cloned()
            .flatten()
            .unwrap_or_default();
        Ok(last
            .into_iter()
            .chain(pending)
            .find(|m| m.slug() == Some(slug) || m.id().as_str() == slug))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// StaticPriceFeed
// ---------------------------------------------------------------------------

/// Price feed returning the same prices every time, or always failing.
pub struct StaticPriceFeed {
    prices: Option<Vec<CryptoPrice>>,
}

impl StaticPriceFeed {
    pub fn new(prices: Vec<CryptoPrice>) -> Self {
        Self {
            prices: Some(prices),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self { prices: None }
    }
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn fetch_prices(&self) -> Result<Vec<CryptoPrice>> {
        self.prices
            .clone()
            .ok_or_else(|| Error::Connection("price feed unavailable".to_string()))
    }
}

// ---------------------------------------------------------------------------
// ScriptedFlow
// ---------------------------------------------------------------------------

/// Trade flow yielding queued alerts in order, then nothing.
///
/// Like the live flow it yields nothing when there are no markets.
pub struct ScriptedFlow {
    alerts: VecDeque<TradeAlert>,
}

impl ScriptedFlow {
    pub fn new(alerts: Vec<TradeAlert>) -> Self {
        Self {
            alerts: alerts.into(),
        }
    }
}

impl TradeFlow for ScriptedFlow {
    fn next_alert(&mut self, markets: &[MarketSnapshot], _now: DateTime<Utc>) -> Option<TradeAlert> {
        if markets.is_empty() {
            return None;
        }
        self.alerts.pop_front()
    }
}

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

/// Notifier that records every alert it receives.
///
/// Clones share the same record, so keep one clone for assertions and
/// register the other.
#[derive(Clone)]
pub struct RecordingNotifier {
    delivered: Arc<Mutex<Vec<(TradeAlert, Option<MarketSnapshot>)>>>,
    succeed: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            succeed: true,
        }
    }

    /// Record deliveries but report them as failed.
    pub fn failing() -> Self {
        Self {
            succeed: false,
            ..Self::new()
        }
    }

    pub fn alerts(&self) -> Vec<TradeAlert> {
        self.delivered.lock().iter().map(|(a, _)| a.clone()).collect()
    }

    pub fn markets(&self) -> Vec<Option<MarketSnapshot>> {
        self.delivered.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().len()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertNotifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, alert: &TradeAlert, market: Option<&MarketSnapshot>) -> bool {
        self.delivered
            .lock()
            .push((alert.clone(), market.cloned()));
        self.succeed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{binary_market, fixed_now};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn scripted_source_pops_then_repeats() {
        let source = ScriptedMarketSource::new(vec![
            Some(vec![binary_market("a", dec!(1), dec!(10))]),
            None,
            Some(vec![binary_market("b", dec!(1), dec!(10))]),
        ]);
        assert_eq!(source.fetch_markets(10).await.unwrap()[0].id().as_str(), "a");
        assert!(source.fetch_markets(10).await.is_err());
        assert_eq!(source.fetch_markets(10).await.unwrap()[0].id().as_str(), "b");
        assert_eq!(source.fetch_markets(10).await.unwrap()[0].id().as_str(), "b");
        assert_eq!(source.fetch_count().load(Ordering::SeqCst), 4);
    }

    #[test]
    fn scripted_flow_needs_markets() {
        let mut flow = ScriptedFlow::new(vec![crate::testkit::domain::alert("a", dec!(1))]);
        assert!(flow.next_alert(&[], fixed_now()).is_none());
        let markets = vec![binary_market("a", dec!(1), dec!(10))];
        assert!(flow.next_alert(&markets, fixed_now()).is_some());
        assert!(flow.next_alert(&markets, fixed_now()).is_none());
    }
}
