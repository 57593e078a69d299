//! Spot price quotes for display alongside markets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Price;

/// A spot crypto price with its 24h change.
///
/// Display only: no detection logic reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoPrice {
    /// Feed-specific asset identifier (e.g. `bitcoin`).
    pub id: String,
    /// Ticker symbol (e.g. `BTC`).
    pub symbol: String,
    pub price: Price,
    /// 24h change in percent.
    pub change_24h: Decimal,
}

impl CryptoPrice {
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.change_24h >= Decimal::ZERO
    }
}
