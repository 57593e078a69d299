//! Synthetic whale trade sampling.
//!
//! The monitor does not observe real trade flow. Instead it draws one
//! plausible large trade per flow tick from the most liquid markets, which
//! exercises the alert pipeline end to end. All randomness comes from the
//! caller's RNG and the clock is passed in, so a seeded RNG reproduces the
//! exact same alert.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{AlertId, MarketSnapshot, Side, TradeAlert, Volume};

/// Sampling parameters for synthetic trade sizes.
#[derive(Debug, Clone, Deserialize)]
pub struct WhaleConfig {
    /// Candidates are drawn from the first N markets (sorted by volume upstream).
    #[serde(default = "default_candidate_window")]
    pub candidate_window: usize,

    /// Markets above this 24h volume use the large floor.
    #[serde(default = "default_large_market_volume")]
    pub large_market_volume: Volume,

    #[serde(default = "default_large_market_floor")]
    pub large_market_floor: Volume,

    #[serde(default = "default_base_floor")]
    pub base_floor: Volume,

    /// Sizes are drawn uniformly from `[floor, floor + size_jitter)`.
    #[serde(default = "default_size_jitter")]
    pub size_jitter: u64,
}

const fn default_candidate_window() -> usize {
    20
}

fn default_large_market_volume() -> Volume {
    Decimal::from(1_000_000)
}

fn default_large_market_floor() -> Volume {
    Decimal::from(50_000)
}

fn default_base_floor() -> Volume {
    Decimal::from(10_000)
}

const fn default_size_jitter() -> u64 {
    100_000
}

impl Default for WhaleConfig {
    fn default() -> Self {
        Self {
            candidate_window: default_candidate_window(),
            large_market_volume: default_large_market_volume(),
            large_market_floor: default_large_market_floor(),
            base_floor: default_base_floor(),
            size_jitter: default_size_jitter(),
        }
    }
}

impl WhaleConfig {
    /// Minimum synthetic trade size for a market, scaled by its liquidity.
    #[must_use]
    pub fn floor_for(&self, market: &MarketSnapshot) -> Volume {
        if market.volume() > self.large_market_volume {
            self.large_market_floor
        } else {
            self.base_floor
        }
    }
}

/// Draw one synthetic trade alert from `markets`.
///
/// Returns `None` only when `markets` is empty. The returned size is always
/// at least [`WhaleConfig::floor_for`] the chosen market; comparing it with
/// the user's threshold is left to the caller.
pub fn sample_whale_alert<R: Rng + ?Sized>(
    markets: &[MarketSnapshot],
    config: &WhaleConfig,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Option<TradeAlert> {
    if markets.is_empty() {
        return None;
    }

    let window = markets.len().min(config.candidate_window.max(1));
    let target = &markets[rng.gen_range(0..window)];

    let floor = config.floor_for(target);
    let jitter = if config.size_jitter == 0 {
        0
    } else {
        rng.gen_range(0..config.size_jitter)
    };
    let size = floor + Decimal::from(jitter);

    let price = target.first_price().unwrap_or_else(|| Decimal::new(5, 1));
    let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };

    Some(TradeAlert {
        id: AlertId::from_random_bytes(rng.gen()),
        market_id: target.id().clone(),
        market_name: target.name().to_string(),
        side,
        size,
        price,
        address: random_address(rng),
        timestamp: now,
    })
}

/// `0x` followed by 40 lowercase hex characters.
pub(crate) fn random_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_hex(rng, 20)
}

/// `0x` followed by `len` random bytes as lowercase hex.
pub(crate) fn random_hex<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    let mut hex = String::with_capacity(2 + len * 2);
    hex.push_str("0x");
    for _ in 0..len {
        let byte: u8 = rng.gen();
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarketId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn market(id: &str, volume: Volume, prices: Vec<Decimal>) -> MarketSnapshot {
        let outcomes = (0..prices.len()).map(|i| format!("o{i}")).collect();
        MarketSnapshot::new(MarketId::from(id), format!("{id}?"), outcomes, prices, volume)
    }

    #[test]
    fn test_empty_markets_yield_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_whale_alert(&[], &WhaleConfig::default(), &mut rng, Utc::now()).is_none());
    }

    #[test]
    fn test_large_market_uses_large_floor() {
        let markets = vec![market("big", dec!(2000000), vec![dec!(0.6), dec!(0.4)])];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let alert =
                sample_whale_alert(&markets, &WhaleConfig::default(), &mut rng, Utc::now()).unwrap();
            assert!(alert.size >= dec!(50000));
            assert!(alert.size < dec!(150000));
            assert_eq!(alert.price, dec!(0.6));
        }
    }

    #[test]
    fn test_small_market_uses_base_floor() {
        let markets = vec![market("small", dec!(1000000), vec![dec!(0.2), dec!(0.8)])];
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let alert =
                sample_whale_alert(&markets, &WhaleConfig::default(), &mut rng, Utc::now()).unwrap();
            assert!(alert.size >= dec!(10000));
            assert!(alert.size < dec!(110000));
        }
    }

    #[test]
    fn test_market_without_prices_defaults_to_half() {
        let markets = vec![market("bare", dec!(10), vec![])];
        let mut rng = StdRng::seed_from_u64(3);
        let alert =
            sample_whale_alert(&markets, &WhaleConfig::default(), &mut rng, Utc::now()).unwrap();
        assert_eq!(alert.price, dec!(0.5));
    }

    #[test]
    fn test_candidates_come_from_window() {
        let markets: Vec<_> = (0..30)
            .map(|i| market(&format!("m{i}"), dec!(100), vec![dec!(0.5), dec!(0.5)]))
            .collect();
        let config = WhaleConfig {
            candidate_window: 3,
            ..WhaleConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let alert = sample_whale_alert(&markets, &config, &mut rng, Utc::now()).unwrap();
            assert!(["m0", "m1", "m2"].contains(&alert.market_id.as_str()));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let markets = vec![
            market("a", dec!(5000000), vec![dec!(0.3), dec!(0.7)]),
            market("b", dec!(500), vec![dec!(0.9), dec!(0.1)]),
        ];
        let now = Utc::now();
        let first = sample_whale_alert(
            &markets,
            &WhaleConfig::default(),
            &mut StdRng::seed_from_u64(42),
            now,
        );
        let second = sample_whale_alert(
            &markets,
            &WhaleConfig::default(),
            &mut StdRng::seed_from_u64(42),
            now,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_address_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let address = random_address(&mut rng);
        assert_eq!(address.len(), 42);
        assert!(address.starts_with("0x"));
        assert!(address[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
