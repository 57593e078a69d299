//! Builders for domain values used across tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{AlertId, MarketId, MarketSnapshot, Price, Side, TradeAlert, Volume};

/// A market named `Market {id}` with outcomes `O0..On` at `prices`.
pub fn market(id: &str, prices: &[Price], volume: Volume) -> MarketSnapshot {
    let outcomes = (0..prices.len()).map(|i| format!("O{i}")).collect();
    MarketSnapshot::new(
        MarketId::new(id),
        format!("Market {id}"),
        outcomes,
        prices.to_vec(),
        volume,
    )
}

/// A Yes/No market whose prices sum to `sum` (split evenly).
pub fn binary_market(id: &str, sum: Decimal, volume: Volume) -> MarketSnapshot {
    let half = sum / Decimal::TWO;
    MarketSnapshot::new(
        MarketId::new(id),
        format!("Market {id}"),
        vec!["Yes".to_string(), "No".to_string()],
        vec![half, sum - half],
        volume,
    )
}

/// Fixed instant for deterministic timestamps.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// An alert of `size` on `market_id`.
pub fn alert(market_id: &str, size: Volume) -> TradeAlert {
    TradeAlert {
        id: AlertId::from_random_bytes([7; 16]),
        market_id: MarketId::new(market_id),
        market_name: format!("Market {market_id}"),
        side: Side::Buy,
        size,
        price: Decimal::new(5, 1),
        address: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
        timestamp: fixed_now(),
    }
}
