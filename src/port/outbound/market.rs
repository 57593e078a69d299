//! Market data port.

use async_trait::async_trait;

use crate::domain::MarketSnapshot;
use crate::error::Result;

/// Source of prediction-market snapshots.
///
/// Implementations return markets ordered by 24h volume, highest first.
/// The whale sampler relies on that ordering to pick from the most liquid
/// markets.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Fetch up to `limit` active markets.
    async fn fetch_markets(&self, limit: usize) -> Result<Vec<MarketSnapshot>>;

    /// Resolve a single market by market or event slug.
    ///
    /// Returns `Ok(None)` when nothing matches.
    async fn fetch_market_by_slug(&self, slug: &str) -> Result<Option<MarketSnapshot>>;

    /// Name used in logs.
    fn source_name(&self) -> &'static str;
}
