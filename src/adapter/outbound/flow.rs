//! Synthetic trade flow.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::whale::{sample_whale_alert, WhaleConfig};
use crate::domain::{MarketSnapshot, TradeAlert};
use crate::port::TradeFlow;

/// Trade flow backed by [`sample_whale_alert`].
pub struct SyntheticTradeFlow<R = StdRng> {
    rng: R,
    config: WhaleConfig,
}

impl SyntheticTradeFlow<StdRng> {
    /// Flow seeded from OS entropy.
    #[must_use]
    pub fn from_entropy(config: WhaleConfig) -> Self {
        Self::new(StdRng::from_entropy(), config)
    }

    /// Reproducible flow for tests and replays.
    #[must_use]
    pub fn seeded(seed: u64, config: WhaleConfig) -> Self {
        Self::new(StdRng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> SyntheticTradeFlow<R> {
    pub fn new(rng: R, config: WhaleConfig) -> Self {
        Self { rng, config }
    }
}

impl<R: Rng + Send> TradeFlow for SyntheticTradeFlow<R> {
    fn next_alert(&mut self, markets: &[MarketSnapshot], now: DateTime<Utc>) -> Option<TradeAlert> {
        sample_whale_alert(markets, &self.config, &mut self.rng, now)
    }
}
