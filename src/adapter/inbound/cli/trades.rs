//! Table rows for trade history and trader profiles.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tabled::Tabled;

use crate::domain::{AddressStats, TradeRecord};

/// One row of an address history.
#[derive(Tabled)]
pub(crate) struct HistoryRow {
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Side")]
    side: &'static str,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Tx")]
    tx: String,
}

impl HistoryRow {
    pub(crate) fn new(trade: &TradeRecord, now: DateTime<Utc>) -> Self {
        Self {
            age: format_age(trade.timestamp, now),
            market: trade.market_name.clone(),
            side: trade.side.as_str(),
            size: trade.size.round_dp(0).to_string(),
            price: trade.price.round_dp(2).to_string(),
            tx: trade.short_hash(),
        }
    }
}

/// One fill of a market tape.
#[derive(Tabled)]
pub(crate) struct TapeRow {
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Side")]
    side: &'static str,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Whale")]
    whale: &'static str,
}

impl TapeRow {
    pub(crate) fn new(trade: &TradeRecord, threshold: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            age: format_age(trade.timestamp, now),
            address: trade.short_address(),
            side: trade.side.as_str(),
            size: trade.size.round_dp(0).to_string(),
            price: trade.price.round_dp(2).to_string(),
            whale: if trade.is_whale(threshold) { "yes" } else { "" },
        }
    }
}

/// One profiled trader.
#[derive(Tabled)]
pub(crate) struct TraderRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Win rate")]
    win_rate: String,
    #[tabled(rename = "PnL")]
    pnl: String,
    #[tabled(rename = "Elite")]
    elite: &'static str,
}

impl From<&AddressStats> for TraderRow {
    fn from(stats: &AddressStats) -> Self {
        Self {
            address: stats.address.clone(),
            tier: stats.tier.to_string(),
            win_rate: format_percent(stats.win_rate),
            pnl: stats.pnl.round_dp(0).to_string(),
            elite: if stats.is_elite() { "yes" } else { "" },
        }
    }
}

/// Fraction in [0, 1] as a whole percentage.
pub(crate) fn format_percent(fraction: Decimal) -> String {
    format!("{}%", (fraction * Decimal::ONE_HUNDRED).round_dp(0))
}

/// Coarse age of `at` relative to `now`: `now`, `12m`, `3h`, `2d`.
pub(crate) fn format_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    match minutes {
        m if m < 1 => "now".to_string(),
        m if m < 60 => format!("{m}m"),
        m if m < 60 * 24 => format!("{}h", m / 60),
        m => format!("{}d", m / (60 * 24)),
    }
}
