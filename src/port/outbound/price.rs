//! Crypto price port.

use async_trait::async_trait;

use crate::domain::CryptoPrice;
use crate::error::Result;

#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Current USD prices with 24h change for the configured assets.
    async fn fetch_prices(&self) -> Result<Vec<CryptoPrice>>;
}
