//! Trade alert types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{AlertId, MarketId};
use super::money::{Price, Volume};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single large-trade alert.
///
/// Alerts are immutable once created; the ledger only ever prepends and
/// truncates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeAlert {
    pub id: AlertId,
    pub market_id: MarketId,
    pub market_name: String,
    pub side: Side,
    /// Notional size in quote currency.
    pub size: Volume,
    pub price: Price,
    /// Counterparty identifier. Not validated.
    pub address: String,
    pub timestamp: DateTime<Utc>,
}

impl TradeAlert {
    /// Whether this alert clears the user's whale threshold.
    ///
    /// The comparison is strict: a trade exactly at the threshold is not
    /// alert-worthy.
    #[must_use]
    pub fn is_whale(&self, threshold: Volume) -> bool {
        self.size > threshold
    }

    /// Address shortened for display (`0x1234abcd...`).
    #[must_use]
    pub fn short_address(&self) -> String {
        if self.address.chars().count() <= 12 {
            return self.address.clone();
        }
        let head: String = self.address.chars().take(10).collect();
        format!("{head}...")
    }
}
