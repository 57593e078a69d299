//! Synthetic trade history.
//!
//! Like the whale flow, there is no trade indexer behind these yet. Address
//! history replays a fixed set of recent positions with jittered sizes, and
//! the market tape draws a dozen fills, roughly a third of them whale-sized.
//! All randomness comes from the caller's RNG and the clock is passed in.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use super::address::profile_address;
use super::whale::{random_address, random_hex};
use crate::domain::{AddressStats, MarketId, MarketSnapshot, Side, TradeRecord};

/// Fills drawn per market tape.
pub const MARKET_TAPE_LEN: usize = 12;

/// Leading fills of a tape whose addresses get profiled.
pub const PROFILED_FILLS: usize = 10;

/// Profiles kept by [`top_traders`] by default.
pub const TOP_TRADERS: usize = 3;

/// Addresses shorter than this have no history.
const MIN_ADDRESS_LEN: usize = 10;

struct Position {
    market_id: &'static str,
    market_name: &'static str,
    /// `None` draws the side.
    side: Option<Side>,
    base_size: i64,
    size_jitter: i64,
    /// Price in hundredths.
    price_cents: i64,
    age_hours: i64,
}

const ADDRESS_POSITIONS: [Position; 3] = [
    Position {
        market_id: "btc-100k",
        market_name: "Will Bitcoin reach $100k by March?",
        side: None,
        base_size: 15_400,
        size_jitter: 5_000,
        price_cents: 64,
        age_hours: 0,
    },
    Position {
        market_id: "fed-rates",
        market_name: "Fed interest rate decision March",
        side: Some(Side::Sell),
        base_size: 5_200,
        size_jitter: 2_000,
        price_cents: 88,
        age_hours: 1,
    },
    Position {
        market_id: "election-2024",
        market_name: "US Presidential Election 2024 Winner",
        side: Some(Side::Buy),
        base_size: 125_000,
        size_jitter: 50_000,
        price_cents: 52,
        age_hours: 24,
    },
];

/// Recent trades of `address`, newest first.
///
/// Empty for addresses shorter than 10 characters.
pub fn address_trades<R: Rng + ?Sized>(
    address: &str,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<TradeRecord> {
    let address = address.trim().to_lowercase();
    if address.len() < MIN_ADDRESS_LEN {
        return Vec::new();
    }

    ADDRESS_POSITIONS
        .iter()
        .map(|position| {
            let side = position.side.unwrap_or_else(|| random_side(rng));
            let size = position.base_size + rng.gen_range(0..position.size_jitter);
            TradeRecord {
                market_id: MarketId::from(position.market_id),
                market_name: position.market_name.to_string(),
                side,
                size: Decimal::from(size),
                price: Decimal::new(position.price_cents, 2),
                timestamp: now - Duration::hours(position.age_hours),
                transaction_hash: random_hex(rng, 32),
                address: address.clone(),
            }
        })
        .collect()
}

/// Recent fills on `market`, newest first.
///
/// Whale fills are sized in `[50_000, 200_000)`, the rest in
/// `[500, 5_500)`. Prices fall in `[0.10, 0.90)`. Fill `i` is at most
/// `i * 10` minutes old.
pub fn market_trades<R: Rng + ?Sized>(
    market: &MarketSnapshot,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<TradeRecord> {
    let mut trades: Vec<TradeRecord> = (0..MARKET_TAPE_LEN as i64)
        .map(|i| {
            let whale = rng.gen_bool(0.3);
            let size_cents = if whale {
                rng.gen_range(5_000_000..20_000_000)
            } else {
                rng.gen_range(50_000..550_000)
            };
            let age_ms = i * rng.gen_range(0..600_000);
            TradeRecord {
                market_id: market.id().clone(),
                market_name: market.name().to_string(),
                side: random_side(rng),
                size: Decimal::new(size_cents, 2),
                price: Decimal::new(rng.gen_range(1_000..9_000), 4),
                timestamp: now - Duration::milliseconds(age_ms),
                transaction_hash: random_hex(rng, 32),
                address: random_address(rng),
            }
        })
        .collect();

    trades.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    trades
}

/// Profile the distinct addresses behind the leading fills of `trades`.
///
/// Addresses are taken from the first [`PROFILED_FILLS`] trades in order,
/// profiled, ranked by win rate (ties keep first appearance) and cut to
/// `limit`.
#[must_use]
pub fn top_traders(trades: &[TradeRecord], limit: usize, now: DateTime<Utc>) -> Vec<AddressStats> {
    let mut seen = HashSet::new();
    let mut profiles: Vec<AddressStats> = trades
        .iter()
        .take(PROFILED_FILLS)
        .filter(|trade| seen.insert(trade.address.to_lowercase()))
        .map(|trade| profile_address(&trade.address, now))
        .collect();

    profiles.sort_by(|a, b| b.win_rate.cmp(&a.win_rate));
    profiles.truncate(limit);
    profiles
}

fn random_side<R: Rng + ?Sized>(rng: &mut R) -> Side {
    if rng.gen_bool(0.5) {
        Side::Buy
    } else {
        Side::Sell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    const WALLET: &str = "0x742D35Cc6634C0532925a3b844Bc454e4438f44e";

    fn market() -> MarketSnapshot {
        MarketSnapshot::new(
            MarketId::from("m1"),
            "Will it rain?",
            vec!["Yes".into(), "No".into()],
            vec![dec!(0.4), dec!(0.6)],
            dec!(1000),
        )
    }

    fn fill(address: &str) -> TradeRecord {
        TradeRecord {
            market_id: MarketId::from("m1"),
            market_name: "Will it rain?".into(),
            side: Side::Buy,
            size: dec!(1000),
            price: dec!(0.5),
            timestamp: Utc::now(),
            transaction_hash: "0x00".into(),
            address: address.into(),
        }
    }

    #[test]
    fn short_address_has_no_history() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(address_trades("0x1234", &mut rng, Utc::now()).is_empty());
        assert!(address_trades("", &mut rng, Utc::now()).is_empty());
    }

    #[test]
    fn address_history_replays_positions() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(2);
        let trades = address_trades(WALLET, &mut rng, now);

        assert_eq!(trades.len(), 3);
        let ids: Vec<_> = trades.iter().map(|t| t.market_id.as_str()).collect();
        assert_eq!(ids, vec!["btc-100k", "fed-rates", "election-2024"]);

        assert!(trades[0].size >= dec!(15400) && trades[0].size < dec!(20400));
        assert_eq!(trades[1].side, Side::Sell);
        assert_eq!(trades[1].price, dec!(0.88));
        assert_eq!(trades[2].side, Side::Buy);
        assert!(trades[2].size >= dec!(125000) && trades[2].size < dec!(175000));
        assert_eq!(trades[2].timestamp, now - Duration::hours(24));

        for trade in &trades {
            assert_eq!(trade.address, WALLET.to_lowercase());
            assert_eq!(trade.transaction_hash.len(), 66);
        }
    }

    #[test]
    fn market_tape_is_newest_first_and_bounded() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(3);
        let trades = market_trades(&market(), &mut rng, now);

        assert_eq!(trades.len(), MARKET_TAPE_LEN);
        assert!(trades.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        for trade in &trades {
            assert_eq!(trade.market_id.as_str(), "m1");
            assert!(trade.timestamp <= now);
            assert!(trade.timestamp >= now - Duration::minutes(110));
            assert!(trade.price >= dec!(0.10) && trade.price < dec!(0.90));
            let retail = trade.size >= dec!(500) && trade.size < dec!(5500);
            let whale = trade.size >= dec!(50000) && trade.size < dec!(200000);
            assert!(retail || whale, "size {} out of range", trade.size);
            assert_eq!(trade.address.len(), 42);
        }
    }

    #[test]
    fn seeded_tapes_agree() {
        let now = Utc::now();
        let a = market_trades(&market(), &mut StdRng::seed_from_u64(9), now);
        let b = market_trades(&market(), &mut StdRng::seed_from_u64(9), now);
        assert_eq!(a, b);
    }

    #[test]
    fn top_traders_dedupes_and_ranks_by_win_rate() {
        // Seeds from the 11th char: 'a' = 97 (0.67), '1' = 49 (0.69), '2' = 50 (0.45).
        let trades = vec![
            fill("0x00000000aaaa"),
            fill("0x000000001bbb"),
            fill("0x00000000AAAA"),
            fill("0x000000002ccc"),
        ];

        let top = top_traders(&trades, TOP_TRADERS, Utc::now());
        let addresses: Vec<_> = top.iter().map(|s| s.address.as_str()).collect();
        assert_eq!(
            addresses,
            vec!["0x000000001bbb", "0x00000000aaaa", "0x000000002ccc"]
        );
        assert!(top[0].is_elite());
        assert!(!top[2].is_elite());

        assert_eq!(top_traders(&trades, 1, Utc::now()).len(), 1);
    }

    #[test]
    fn only_leading_fills_are_profiled() {
        let mut trades: Vec<_> = (0..PROFILED_FILLS).map(|_| fill("0x000000001bbb")).collect();
        trades.push(fill("0x00000000aaaa"));

        let top = top_traders(&trades, TOP_TRADERS, Utc::now());
        assert_eq!(top.len(), 1);
    }
}
