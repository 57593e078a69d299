//! Executed trade records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::Side;
use super::id::MarketId;
use super::money::{Price, Volume};

/// One fill from an address or market trade history.
///
/// The transaction hash identifies the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub market_id: MarketId,
    pub market_name: String,
    pub side: Side,
    /// Notional size in quote currency.
    pub size: Volume,
    pub price: Price,
    pub timestamp: DateTime<Utc>,
    pub transaction_hash: String,
    pub address: String,
}

impl TradeRecord {
    /// Whether this fill is above `threshold`. Strict, like alerts.
    #[must_use]
    pub fn is_whale(&self, threshold: Volume) -> bool {
        self.size > threshold
    }

    /// Transaction hash shortened for display (`0xabcdef12...`).
    #[must_use]
    pub fn short_hash(&self) -> String {
        shorten(&self.transaction_hash)
    }

    #[must_use]
    pub fn short_address(&self) -> String {
        shorten(&self.address)
    }
}

fn shorten(text: &str) -> String {
    if text.chars().count() <= 12 {
        return text.to_string();
    }
    let head: String = text.chars().take(10).collect();
    format!("{head}...")
}
