//! Polymarket Gamma API client.
//!
//! Gamma (`gamma-api.polymarket.com`) serves market discovery with volume,
//! liquidity and outcome prices. Markets are requested sorted by 24h volume
//! so the first entries are the most liquid.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::dto::response::{GammaEvent, GammaMarket};
use super::settings::PolymarketConfig;
use crate::adapter::outbound::http::JsonClient;
use crate::domain::MarketSnapshot;
use crate::error::Result;
use crate::port::MarketSource;

/// HTTP client for the Polymarket Gamma API.
pub struct PolymarketClient {
    http: JsonClient,
    gamma_url: String,
}

impl PolymarketClient {
    #[must_use]
    pub fn from_config(config: &PolymarketConfig) -> Self {
        Self {
            http: JsonClient::from_config(&config.http),
            gamma_url: config.gamma_api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch active markets, highest 24h volume first.
    ///
    /// Entries not explicitly marked active are dropped.
    pub async fn get_gamma_markets(&self, limit: usize) -> Result<Vec<GammaMarket>> {
        let url = format!(
            "{}/markets?active=true&closed=false&order=volume24hr&ascending=false&limit={}",
            self.gamma_url, limit
        );

        info!(url = %url, "Fetching active markets (Gamma)");

        let raw: Vec<Value> = self.http.get_with_retry(&url).await?;
        let fetched = raw.len();
        let markets: Vec<GammaMarket> = GammaMarket::decode_batch(raw)
            .into_iter()
            .filter(GammaMarket::is_active)
            .collect();
        debug!(fetched, active = markets.len(), "Fetched markets from Gamma");

        Ok(markets)
    }

    /// Markets whose market slug equals `slug`.
    pub async fn get_markets_by_slug(&self, slug: &str) -> Result<Vec<GammaMarket>> {
        let url = self.query_url("markets", slug)?;
        let raw: Vec<Value> = self.http.get_with_retry(url.as_str()).await?;
        Ok(GammaMarket::decode_batch(raw))
    }

    /// Events whose event slug equals `slug`.
    pub async fn get_events_by_slug(&self, slug: &str) -> Result<Vec<GammaEvent>> {
        let url = self.query_url("events", slug)?;
        self.http.get_with_retry(url.as_str()).await
    }

    fn query_url(&self, resource: &str, slug: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{resource}", self.gamma_url))?;
        url.query_pairs_mut().append_pair("slug", slug);
        Ok(url)
    }

    async fn best_event_market(&self, slug: &str) -> Result<Option<GammaMarket>> {
        let events = self.get_events_by_slug(slug).await?;
        Ok(events.into_iter().next().and_then(GammaEvent::best_market))
    }
}

/// Event slug with its last `-` segment removed, if it has more than one.
///
/// Market pages often append an outcome suffix to the event slug.
#[must_use]
pub fn parent_slug(slug: &str) -> Option<&str> {
    slug.rsplit_once('-').map(|(parent, _)| parent)
}

#[async_trait]
impl MarketSource for PolymarketClient {
    async fn fetch_markets(&self, limit: usize) -> Result<Vec<MarketSnapshot>> {
        let markets = self.get_gamma_markets(limit).await?;
        Ok(markets.into_iter().map(GammaMarket::into_snapshot).collect())
    }

    async fn fetch_market_by_slug(&self, slug: &str) -> Result<Option<MarketSnapshot>> {
        info!(slug, "Resolving market");

        if let Some(market) = self.get_markets_by_slug(slug).await?.into_iter().next() {
            return Ok(Some(market.into_snapshot()));
        }

        if let Some(market) = self.best_event_market(slug).await? {
            return Ok(Some(market.into_snapshot()));
        }

        if let Some(parent) = parent_slug(slug) {
            debug!(slug, parent, "Retrying lookup with parent event slug");
            if let Some(market) = self.best_event_market(parent).await? {
                return Ok(Some(market.into_snapshot()));
            }
        }

        Ok(None)
    }

    fn source_name(&self) -> &'static str {
        "Polymarket"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_slug_drops_last_segment() {
        assert_eq!(parent_slug("fed-decision-in-march-25-bps"), Some("fed-decision-in-march-25"));
        assert_eq!(parent_slug("a-b"), Some("a"));
        assert_eq!(parent_slug("single"), None);
    }

    #[test]
    fn query_url_encodes_slug() {
        let client = PolymarketClient::from_config(&PolymarketConfig::default());
        let url = client.query_url("events", "who wins?").unwrap();
        assert_eq!(
            url.as_str(),
            "https://gamma-api.polymarket.com/events?slug=who+wins%3F"
        );
    }
}
