//! Trader address profile types.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Volume;

/// Coarse classification of a trading address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressTier {
    Whale,
    SmartMoney,
    Retail,
    Bot,
}

impl fmt::Display for AddressTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Whale => "WHALE",
            Self::SmartMoney => "SMART_MONEY",
            Self::Retail => "RETAIL",
            Self::Bot => "BOT",
        };
        f.write_str(label)
    }
}

/// Activity summary for one address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressStats {
    pub address: String,
    /// Fraction of winning trades in [0, 1].
    pub win_rate: Decimal,
    pub total_volume: Volume,
    pub total_trades: u32,
    pub pnl: Decimal,
    pub tier: AddressTier,
    pub last_active: DateTime<Utc>,
}

impl AddressStats {
    /// Win rate above which an address counts as elite.
    pub const ELITE_WIN_RATE: Decimal = Decimal::from_parts(55, 0, 0, false, 2);

    #[must_use]
    pub fn is_elite(&self) -> bool {
        self.win_rate > Self::ELITE_WIN_RATE
    }
}
